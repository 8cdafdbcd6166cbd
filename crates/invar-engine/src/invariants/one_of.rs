//! `x == c` / `x one of { a, b, c }`: a scalar that takes few distinct values.

use smallvec::SmallVec;

use invar_core::constants::{
    ONE_OF_LIMIT, PROBABILITY_JUSTIFIED, PROBABILITY_UNJUSTIFIED, PROBABILITY_UNKNOWN,
};
use invar_core::types::{SlotKind, Value};

use super::candidate::{int_operand, set_text, Candidate, Observed, Violation};

/// Distinct values of one scalar slot, kept sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneOf {
    elts: SmallVec<[i64; ONE_OF_LIMIT]>,
    kind: SlotKind,
}

impl OneOf {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            elts: SmallVec::new(),
            kind,
        }
    }

    /// Observed values in ascending order.
    pub fn values(&self) -> &[i64] {
        &self.elts
    }

    pub fn num_elts(&self) -> usize {
        self.elts.len()
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn min(&self) -> Option<i64> {
        self.elts.first().copied()
    }

    pub fn max(&self) -> Option<i64> {
        self.elts.last().copied()
    }

    /// Exactly `{0}`.
    pub fn is_only_zero(&self) -> bool {
        self.elts.as_slice() == [0]
    }

    /// Both non-empty and sharing no value.
    pub fn is_disjoint_from(&self, other: &OneOf) -> bool {
        !self.elts.is_empty()
            && !other.elts.is_empty()
            && !self.elts.iter().any(|v| other.elts.binary_search(v).is_ok())
    }

    /// One value that makes the variable a constant. A single reference
    /// value is not: only its identity is known.
    pub fn is_single_constant(&self) -> bool {
        self.elts.len() == 1 && self.kind != SlotKind::Hashcode
    }

    /// Reason to destroy the candidate rather than record `v`.
    fn rejects(&self, v: i64) -> Option<String> {
        if self.elts.len() >= ONE_OF_LIMIT {
            return Some(format!("more than {ONE_OF_LIMIT} distinct values"));
        }
        match self.kind {
            SlotKind::Boolean if !self.elts.is_empty() => {
                Some("boolean took both values".to_string())
            }
            SlotKind::Hashcode if self.elts.len() >= 2 => {
                Some("a third distinct reference".to_string())
            }
            SlotKind::Hashcode if self.elts.first().is_some_and(|e| *e != 0) && v != 0 => {
                Some("two distinct non-null references".to_string())
            }
            _ => None,
        }
    }
}

impl Candidate for OneOf {
    fn class_name(&self) -> &'static str {
        "OneOf"
    }

    fn observe(&mut self, values: &[&Value], _count: u32) -> Result<Observed, Violation> {
        let v = int_operand(values[0])?;
        match self.elts.binary_search(&v) {
            Ok(_) => Ok(Observed::Unchanged),
            Err(pos) => {
                if let Some(reason) = self.rejects(v) {
                    return Ok(Observed::Falsified(reason));
                }
                self.elts.insert(pos, v);
                Ok(Observed::Updated)
            }
        }
    }

    fn probability(&self) -> Result<f64, Violation> {
        if self.elts.is_empty() {
            return Ok(PROBABILITY_UNKNOWN);
        }
        if self.kind == SlotKind::Hashcode && self.elts.len() > 1 {
            // Null plus one reference: alive, never reported.
            if self.elts.len() == 2 && self.elts[0] == 0 {
                return Ok(PROBABILITY_UNJUSTIFIED);
            }
            return Err(Violation(format!(
                "reference one-of holds {} non-null values",
                self.elts.iter().filter(|v| **v != 0).count()
            )));
        }
        Ok(PROBABILITY_JUSTIFIED)
    }

    fn format(&self, names: &[&str]) -> String {
        let name = names[0];
        match (self.elts.as_slice(), self.kind) {
            ([v], SlotKind::Boolean) => {
                format!("{name} == {}", if *v != 0 { "true" } else { "false" })
            }
            ([0], SlotKind::Hashcode) => format!("{name} == null"),
            ([v], SlotKind::Hashcode) => format!("{name} has only one value (hashcode={v})"),
            ([v], SlotKind::Plain) => format!("{name} == {v}"),
            (elts, _) => format!("{name} one of {}", set_text(elts)),
        }
    }

    fn same_formula(&self, other: &Self) -> bool {
        self.elts == other.elts
    }

    fn repr(&self) -> String {
        set_text(&self.elts)
    }
}
