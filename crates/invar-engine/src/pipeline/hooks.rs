//! Pluggable passes run after inference and before filtering: a suppression
//! pass that marks candidates entailed by simpler ones, and a redundancy
//! oracle.

use invar_core::types::InvariantId;

use crate::invariants::{Invariant, InvariantKind};
use crate::ppt::ProgramPoint;

/// `target` is entailed by `suppressor`, both at the same point. With
/// `on_consequent` the mark goes on the consequent of the implication
/// `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressorAnnotation {
    pub target: InvariantId,
    pub suppressor: InvariantId,
    pub on_consequent: bool,
}

pub trait SuppressionPass: Send + Sync {
    fn annotate(&self, point: &ProgramPoint) -> Vec<SuppressorAnnotation>;
}

pub trait RedundancyOracle: Send + Sync {
    /// Candidates of `point` that say nothing the others don't.
    fn redundant(&self, point: &ProgramPoint) -> Vec<InvariantId>;
}

/// Suppresses bounds and non-zero facts that a justified one-of over the
/// same variable already entails: `x one of { 3, 5 }` makes `x >= 3`,
/// `x <= 5` and `x != 0` redundant.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneOfSuppression;

fn entails(one_of: &Invariant, other: &Invariant) -> bool {
    let Some(set) = one_of.kind().as_one_of() else {
        return false;
    };
    if set.num_elts() == 0 || one_of.var_names() != other.var_names() {
        return false;
    }
    match other.kind() {
        InvariantKind::LowerBound(lb) => set.min() == Some(lb.min()),
        InvariantKind::UpperBound(ub) => set.max() == Some(ub.max()),
        InvariantKind::NonZero(_) => !set.values().contains(&0),
        _ => false,
    }
}

impl SuppressionPass for OneOfSuppression {
    fn annotate(&self, point: &ProgramPoint) -> Vec<SuppressorAnnotation> {
        let one_ofs: Vec<&Invariant> = point
            .invariants()
            .iter()
            .filter(|inv| inv.is_justified() && inv.kind().as_one_of().is_some())
            .collect();
        let mut out = Vec::new();
        for inv in point.invariants() {
            let (target, on_consequent) = match inv.consequent() {
                Some(consequent) => (consequent, true),
                None => (inv, false),
            };
            let suppressor = one_ofs
                .iter()
                .find(|s| s.id() != inv.id() && entails(s, target))
                .map(|s| s.id());
            if let Some(suppressor) = suppressor {
                out.push(SuppressorAnnotation {
                    target: inv.id(),
                    suppressor,
                    on_consequent,
                });
            }
        }
        out
    }
}

/// Apply annotations to the point's pool. Annotations naming unknown
/// candidates are ignored.
pub(crate) fn apply_annotations(point: &mut ProgramPoint, annotations: &[SuppressorAnnotation]) -> usize {
    let mut applied = 0;
    for annotation in annotations {
        let Some(inv) = point.invariant_mut(annotation.target) else {
            continue;
        };
        let target = if annotation.on_consequent {
            match inv.consequent_mut() {
                Some(consequent) => consequent,
                None => continue,
            }
        } else {
            inv
        };
        target.set_suppressor(annotation.suppressor);
        applied += 1;
    }
    applied
}

pub(crate) fn apply_redundancy(point: &mut ProgramPoint, redundant: &[InvariantId]) -> usize {
    let mut applied = 0;
    for id in redundant {
        if let Some(inv) = point.invariant_mut(*id) {
            inv.mark_redundant();
            applied += 1;
        }
    }
    applied
}
