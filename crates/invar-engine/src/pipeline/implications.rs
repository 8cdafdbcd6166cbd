//! Implications at combined exits.
//!
//! When two exits of a function disagree, each side's distinguishing facts
//! hold only on that side. For every pair of exclusive predicates
//! `p1` (exit 1) and `p2` (exit 2), `p1 ==> c` is added at the combined exit
//! for every justified `c` of exit 1 with no same-formula counterpart at
//! exit 2, and symmetrically for `p2`.

use tracing::debug;

use invar_core::errors::EngineError;
use invar_core::types::{FxHashSet, PptId, SmallVec3};

use crate::invariants::{Invariant, JustificationScorer, VarRef};
use crate::ppt::{PptRegistry, ProgramPoint};

/// Candidate references rewritten onto the combined point's slots, or
/// `None` when a variable is not part of the combined schema.
fn remap_vars(invariant: &Invariant, combined: &ProgramPoint) -> Option<SmallVec3<VarRef>> {
    invariant
        .vars()
        .iter()
        .map(|v| {
            combined
                .slot_by_name(&v.name)
                .map(|slot| VarRef::new(slot.index, slot.name.clone()))
        })
        .collect()
}

fn justified_facts(point: &ProgramPoint) -> Vec<&Invariant> {
    point
        .invariants()
        .iter()
        .filter(|inv| inv.is_justified() && inv.consequent().is_none())
        .collect()
}

fn distinguishing<'a>(own: &[&'a Invariant], other: &[&Invariant]) -> Vec<&'a Invariant> {
    own.iter()
        .filter(|c| !other.iter().any(|o| o.is_same_formula(c)))
        .copied()
        .collect()
}

/// `(antecedent, consequent)` pairs for two sibling exits.
fn sibling_pairs<'a>(first: &'a ProgramPoint, second: &'a ProgramPoint) -> Vec<(&'a Invariant, &'a Invariant)> {
    let facts1 = justified_facts(first);
    let facts2 = justified_facts(second);
    let only1 = distinguishing(&facts1, &facts2);
    let only2 = distinguishing(&facts2, &facts1);

    let mut pairs = Vec::new();
    for p1 in &facts1 {
        for p2 in &facts2 {
            if !p1.is_exclusive_formula(p2) {
                continue;
            }
            pairs.extend(only1.iter().filter(|c| c.id() != p1.id()).map(|c| (*p1, *c)));
            pairs.extend(only2.iter().filter(|c| c.id() != p2.id()).map(|c| (*p2, *c)));
        }
    }
    pairs
}

/// Add implications to every combined exit. Returns how many were added.
pub fn add_implications(registry: &mut PptRegistry, scorer: &JustificationScorer) -> Result<usize, EngineError> {
    let combined_ids: Vec<PptId> = registry
        .sorted_ids()
        .into_iter()
        .filter(|id| registry[*id].is_combined())
        .collect();

    let mut added = 0;
    for combined_id in combined_ids {
        let staged: Vec<(Invariant, Invariant)> = {
            let reg: &PptRegistry = registry;
            let combined = &reg[combined_id];
            let siblings: Vec<&ProgramPoint> = combined
                .entry()
                .map(|entry| reg[entry].exits().iter().map(|id| &reg[*id]).collect())
                .unwrap_or_default();

            let mut seen: FxHashSet<String> = combined
                .invariants()
                .iter()
                .filter(|inv| inv.consequent().is_some())
                .map(Invariant::format)
                .collect();
            let mut staged = Vec::new();
            for (i, first) in siblings.iter().enumerate() {
                for second in &siblings[i + 1..] {
                    for (ante, cons) in sibling_pairs(first, second) {
                        let (Some(ante_vars), Some(cons_vars)) =
                            (remap_vars(ante, combined), remap_vars(cons, combined))
                        else {
                            continue;
                        };
                        let ante = ante.remapped(ante.id(), ante_vars);
                        let cons = cons.remapped(cons.id(), cons_vars);
                        let text = format!("({}) ==> ({})", ante.format(), cons.format());
                        if seen.insert(text) {
                            staged.push((ante, cons));
                        }
                    }
                }
            }
            staged
        };

        let point = &mut registry[combined_id];
        for (ante, cons) in staged {
            let id = point.next_invariant_id();
            let mut implication = Invariant::implication(id, ante, cons);
            implication.justify(scorer)?;
            point.adopt(implication);
            added += 1;
        }
        debug!(point = %point.name(), total = added, "added implications");
    }
    Ok(added)
}
