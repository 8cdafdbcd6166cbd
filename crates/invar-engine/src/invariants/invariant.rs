//! A candidate invariant bound to the variables of its program point.

use serde::Serialize;

use invar_core::errors::EngineError;
use invar_core::types::{InvariantId, SmallVec3, Value};

use super::candidate::{Observed, Violation};
use super::discard::{DiscardCode, DiscardInfo};
use super::implication::Implication;
use super::justification::{Justification, JustificationScorer};
use super::kind::InvariantKind;
use crate::derive::Derivation;
use crate::ppt::ProgramPoint;

/// A candidate's reference to one slot of its point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VarRef {
    pub slot: usize,
    pub name: String,
}

impl VarRef {
    pub fn new(slot: usize, name: impl Into<String>) -> Self {
        Self {
            slot,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invariant {
    id: InvariantId,
    vars: SmallVec3<VarRef>,
    kind: InvariantKind,
    destroyed: bool,
    /// Cached classification; cleared on every state change.
    justification: Option<Justification>,
    suppressor: Option<InvariantId>,
    redundant: bool,
    samples: u64,
}

impl Invariant {
    pub fn new(id: InvariantId, vars: SmallVec3<VarRef>, kind: InvariantKind) -> Self {
        Self {
            id,
            vars,
            kind,
            destroyed: false,
            justification: None,
            suppressor: None,
            redundant: false,
            samples: 0,
        }
    }

    /// `(antecedent) ==> (consequent)` over the union of their variables.
    pub fn implication(id: InvariantId, antecedent: Invariant, consequent: Invariant) -> Self {
        let mut vars: SmallVec3<VarRef> = SmallVec3::new();
        for var in antecedent.vars.iter().chain(consequent.vars.iter()) {
            if !vars.contains(var) {
                vars.push(var.clone());
            }
        }
        let kind = InvariantKind::Implication(Implication::new(antecedent, consequent));
        Self::new(id, vars, kind)
    }

    pub fn id(&self) -> InvariantId {
        self.id
    }

    pub fn vars(&self) -> &[VarRef] {
        &self.vars
    }

    pub fn kind(&self) -> &InvariantKind {
        &self.kind
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn suppressor(&self) -> Option<InvariantId> {
        self.suppressor
    }

    pub fn set_suppressor(&mut self, suppressor: InvariantId) {
        self.suppressor = Some(suppressor);
    }

    pub fn is_redundant(&self) -> bool {
        self.redundant
    }

    pub fn mark_redundant(&mut self) {
        self.redundant = true;
    }

    pub fn var_names(&self) -> SmallVec3<&str> {
        self.vars.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn antecedent(&self) -> Option<&Invariant> {
        self.kind.as_implication().map(|i| i.antecedent.as_ref())
    }

    pub fn consequent(&self) -> Option<&Invariant> {
        self.kind.as_implication().map(|i| i.consequent.as_ref())
    }

    pub fn consequent_mut(&mut self) -> Option<&mut Invariant> {
        match &mut self.kind {
            InvariantKind::Implication(i) => Some(i.consequent.as_mut()),
            _ => None,
        }
    }

    /// Feed one tuple, `values` in variable order. Returns the discard
    /// record when the tuple falsifies the candidate; a destroyed
    /// candidate ignores further input.
    pub fn observe(&mut self, values: &[&Value], count: u32) -> Result<Option<DiscardInfo>, EngineError> {
        if self.destroyed {
            return Ok(None);
        }
        match self.kind.observe(values, count) {
            Ok(Observed::Unchanged) => {
                self.samples += u64::from(count);
                Ok(None)
            }
            Ok(Observed::Updated) => {
                self.samples += u64::from(count);
                self.justification = None;
                Ok(None)
            }
            Ok(Observed::Falsified(reason)) => {
                let info = self.discard(DiscardCode::BadSample, reason);
                self.destroyed = true;
                self.justification = None;
                Ok(Some(info))
            }
            Err(violation) => Err(self.violation(violation, Some(values))),
        }
    }

    /// Classify the candidate, reusing the cached result when its state has
    /// not changed since the last call.
    pub fn justify(&mut self, scorer: &JustificationScorer) -> Result<Justification, EngineError> {
        if let Some(cached) = self.justification {
            return Ok(cached);
        }
        let probability = self
            .kind
            .probability()
            .map_err(|v| self.violation(v, None))?;
        let justification = scorer.classify(probability);
        self.justification = Some(justification);
        Ok(justification)
    }

    /// Last computed classification.
    pub fn justification(&self) -> Option<Justification> {
        self.justification
    }

    pub fn is_justified(&self) -> bool {
        !self.destroyed && self.justification.is_some_and(Justification::is_justified)
    }

    pub fn format(&self) -> String {
        self.kind.format(&self.var_names())
    }

    /// Same family, same parameters, same variables.
    pub fn is_same_formula(&self, other: &Invariant) -> bool {
        self.var_names() == other.var_names() && self.kind.same_formula(&other.kind)
    }

    /// Over the same variables and unable to hold together.
    pub fn is_exclusive_formula(&self, other: &Invariant) -> bool {
        self.var_names() == other.var_names() && self.kind.is_exclusive_with(&other.kind)
    }

    /// True when the candidate states nothing beyond what other facts about
    /// `point` already imply.
    pub fn is_obvious_implied(&self, point: &ProgramPoint) -> bool {
        let derivation = self
            .vars
            .first()
            .and_then(|v| point.slot(v.slot))
            .and_then(|s| s.derivation.as_ref());
        match &self.kind {
            InvariantKind::OneOf(one_of) => {
                if derivation.is_some_and(Derivation::is_shifted_length) {
                    return true;
                }
                point.invariants().iter().any(|other| {
                    other.is_justified()
                        && matches!(other.kind(), InvariantKind::EltOneOf(elt) if elt.values() == one_of.values())
                })
            }
            InvariantKind::LowerBound(lb) => match derivation {
                Some(Derivation::Length(length)) => lb.min() <= length.shift,
                _ => false,
            },
            InvariantKind::Linear(linear) => linear.is_identity(),
            InvariantKind::Implication(implication) => {
                implication.consequent.is_obvious_implied(point)
            }
            _ => false,
        }
    }

    /// Copy of this candidate under a new id and variable references,
    /// keeping its accumulated state.
    pub fn remapped(&self, id: InvariantId, vars: SmallVec3<VarRef>) -> Invariant {
        let mut copy = self.clone();
        copy.id = id;
        copy.vars = vars;
        copy.suppressor = None;
        copy.redundant = false;
        copy
    }

    pub fn discard(&self, code: DiscardCode, reason: impl Into<String>) -> DiscardInfo {
        DiscardInfo::new(self.class_name(), self.format(), code, reason).for_invariant(self.id)
    }

    fn violation(&self, violation: Violation, values: Option<&[&Value]>) -> EngineError {
        let operands: Vec<String> = match values {
            Some(values) => self
                .vars
                .iter()
                .zip(values)
                .map(|(var, value)| format!("{}={value}", var.name))
                .collect(),
            None => vec![format!("{} {}", self.var_names().join(", "), self.kind.repr())],
        };
        EngineError::violation(self.class_name(), operands.join(", "), violation.0)
    }
}
