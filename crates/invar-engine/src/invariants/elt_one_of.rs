//! `a[] elements one of { ... }`: the elements of an integer sequence.

use smallvec::SmallVec;

use invar_core::constants::{ONE_OF_LIMIT, PROBABILITY_JUSTIFIED, PROBABILITY_UNKNOWN};
use invar_core::types::Value;

use super::candidate::{set_text, Candidate, Observed, Violation};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EltOneOf {
    elts: SmallVec<[i64; ONE_OF_LIMIT]>,
}

impl EltOneOf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observed elements in ascending order.
    pub fn values(&self) -> &[i64] {
        &self.elts
    }
}

impl Candidate for EltOneOf {
    fn class_name(&self) -> &'static str {
        "EltOneOf"
    }

    fn observe(&mut self, values: &[&Value], _count: u32) -> Result<Observed, Violation> {
        let Value::IntArray(elements) = values[0] else {
            return Err(Violation(format!("expected an integer sequence, got {}", values[0])));
        };
        let mut fresh: Vec<i64> = elements
            .iter()
            .copied()
            .filter(|e| self.elts.binary_search(e).is_err())
            .collect();
        if fresh.is_empty() {
            return Ok(Observed::Unchanged);
        }
        fresh.sort_unstable();
        fresh.dedup();
        if self.elts.len() + fresh.len() > ONE_OF_LIMIT {
            return Ok(Observed::Falsified(format!(
                "more than {ONE_OF_LIMIT} distinct elements"
            )));
        }
        self.elts.extend(fresh);
        self.elts.sort_unstable();
        Ok(Observed::Updated)
    }

    fn probability(&self) -> Result<f64, Violation> {
        if self.elts.is_empty() {
            Ok(PROBABILITY_UNKNOWN)
        } else {
            Ok(PROBABILITY_JUSTIFIED)
        }
    }

    fn format(&self, names: &[&str]) -> String {
        match self.elts.as_slice() {
            [v] => format!("{} elements == {v}", names[0]),
            elts => format!("{} elements one of {}", names[0], set_text(elts)),
        }
    }

    fn same_formula(&self, other: &Self) -> bool {
        self.elts == other.elts
    }

    fn repr(&self) -> String {
        set_text(&self.elts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_elements() {
        let mut e = EltOneOf::new();
        assert_eq!(e.probability(), Ok(PROBABILITY_UNKNOWN));
        e.observe(&[&Value::IntArray(vec![3, 1, 3])], 1).unwrap();
        assert_eq!(e.observe(&[&Value::IntArray(vec![1])], 1), Ok(Observed::Unchanged));
        assert_eq!(e.values(), &[1, 3]);
        assert_eq!(e.format(&["a[]"]), "a[] elements one of { 1, 3 }");
    }

    #[test]
    fn test_too_many_elements_falsify_without_mutation() {
        let mut e = EltOneOf::new();
        e.observe(&[&Value::IntArray(vec![1, 2, 3, 4])], 1).unwrap();
        let outcome = e.observe(&[&Value::IntArray(vec![5, 6])], 1).unwrap();
        assert!(matches!(outcome, Observed::Falsified(_)));
        assert_eq!(e.values(), &[1, 2, 3, 4]);
    }
}
