//! Closed set of candidate families, dispatched by `match`.

use invar_core::types::Value;

use super::bounds::{LowerBound, UpperBound};
use super::candidate::{Candidate, Observed, Violation};
use super::elt_one_of::EltOneOf;
use super::equality::Equality;
use super::implication::Implication;
use super::linear::Linear;
use super::nonzero::NonZero;
use super::one_of::OneOf;
use super::quotient::Quotient;

#[derive(Debug, Clone, PartialEq)]
pub enum InvariantKind {
    OneOf(OneOf),
    EltOneOf(EltOneOf),
    LowerBound(LowerBound),
    UpperBound(UpperBound),
    NonZero(NonZero),
    Equality(Equality),
    Linear(Linear),
    Quotient(Quotient),
    Implication(Implication),
}

macro_rules! dispatch {
    ($kind:expr, $c:ident => $body:expr) => {
        match $kind {
            InvariantKind::OneOf($c) => $body,
            InvariantKind::EltOneOf($c) => $body,
            InvariantKind::LowerBound($c) => $body,
            InvariantKind::UpperBound($c) => $body,
            InvariantKind::NonZero($c) => $body,
            InvariantKind::Equality($c) => $body,
            InvariantKind::Linear($c) => $body,
            InvariantKind::Quotient($c) => $body,
            InvariantKind::Implication($c) => $body,
        }
    };
}

impl InvariantKind {
    pub fn class_name(&self) -> &'static str {
        dispatch!(self, c => c.class_name())
    }

    pub fn observe(&mut self, values: &[&Value], count: u32) -> Result<Observed, Violation> {
        dispatch!(self, c => c.observe(values, count))
    }

    pub fn probability(&self) -> Result<f64, Violation> {
        dispatch!(self, c => c.probability())
    }

    pub fn format(&self, names: &[&str]) -> String {
        dispatch!(self, c => c.format(names))
    }

    pub fn repr(&self) -> String {
        dispatch!(self, c => c.repr())
    }

    pub fn same_formula(&self, other: &InvariantKind) -> bool {
        use InvariantKind::*;
        match (self, other) {
            (OneOf(a), OneOf(b)) => a.same_formula(b),
            (EltOneOf(a), EltOneOf(b)) => a.same_formula(b),
            (LowerBound(a), LowerBound(b)) => a.same_formula(b),
            (UpperBound(a), UpperBound(b)) => a.same_formula(b),
            (NonZero(a), NonZero(b)) => a.same_formula(b),
            (Equality(a), Equality(b)) => a.same_formula(b),
            (Linear(a), Linear(b)) => a.same_formula(b),
            (Quotient(a), Quotient(b)) => a.same_formula(b),
            (Implication(a), Implication(b)) => a.same_formula(b),
            _ => false,
        }
    }

    /// Whether the two candidates (over the same variables) can never hold
    /// together. Symmetric.
    pub fn is_exclusive_with(&self, other: &InvariantKind) -> bool {
        exclusive_one_way(self, other) || exclusive_one_way(other, self)
    }

    pub fn as_one_of(&self) -> Option<&OneOf> {
        match self {
            Self::OneOf(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_implication(&self) -> Option<&Implication> {
        match self {
            Self::Implication(i) => Some(i),
            _ => None,
        }
    }
}

/// Bounds only take part once they have samples; their justification is
/// not consulted.
fn exclusive_one_way(a: &InvariantKind, b: &InvariantKind) -> bool {
    use InvariantKind::*;
    match (a, b) {
        (OneOf(x), OneOf(y)) => x.is_disjoint_from(y),
        (OneOf(x), NonZero(n)) => n.has_samples() && x.is_only_zero(),
        (OneOf(x), LowerBound(lb)) => lb.has_samples() && x.max().is_some_and(|m| m < lb.min()),
        (OneOf(x), UpperBound(ub)) => ub.has_samples() && x.min().is_some_and(|m| m > ub.max()),
        (LowerBound(lb), UpperBound(ub)) => {
            lb.has_samples() && ub.has_samples() && lb.min() > ub.max()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invar_core::types::SlotKind;

    fn one_of(values: &[i64]) -> InvariantKind {
        let mut kind = InvariantKind::OneOf(OneOf::new(SlotKind::Plain));
        for v in values {
            kind.observe(&[&Value::Int(*v)], 1).unwrap();
        }
        kind
    }

    fn lower(values: &[i64]) -> InvariantKind {
        let mut kind = InvariantKind::LowerBound(LowerBound::new());
        for v in values {
            kind.observe(&[&Value::Int(*v)], 1).unwrap();
        }
        kind
    }

    fn upper(values: &[i64]) -> InvariantKind {
        let mut kind = InvariantKind::UpperBound(UpperBound::new());
        for v in values {
            kind.observe(&[&Value::Int(*v)], 1).unwrap();
        }
        kind
    }

    #[test]
    fn test_one_of_exclusivity_is_symmetric() {
        let a = one_of(&[1, 2]);
        let b = one_of(&[3]);
        assert!(a.is_exclusive_with(&b));
        assert!(b.is_exclusive_with(&a));
        assert!(!a.is_exclusive_with(&a));
        assert!(!one_of(&[]).is_exclusive_with(&b));
    }

    #[test]
    fn test_one_of_against_bounds() {
        assert!(one_of(&[1, 2]).is_exclusive_with(&lower(&[5, 9])));
        assert!(lower(&[5, 9]).is_exclusive_with(&one_of(&[1, 2])));
        assert!(!one_of(&[1, 6]).is_exclusive_with(&lower(&[5, 9])));
        assert!(one_of(&[10]).is_exclusive_with(&upper(&[2, 4])));
        assert!(!one_of(&[1]).is_exclusive_with(&lower(&[])));
    }

    #[test]
    fn test_zero_against_nonzero() {
        let mut nz = InvariantKind::NonZero(NonZero::new(SlotKind::Plain));
        assert!(!one_of(&[0]).is_exclusive_with(&nz));
        nz.observe(&[&Value::Int(3)], 1).unwrap();
        assert!(one_of(&[0]).is_exclusive_with(&nz));
        assert!(nz.is_exclusive_with(&one_of(&[0])));
        assert!(!one_of(&[0, 1]).is_exclusive_with(&nz));
    }

    #[test]
    fn test_disjoint_bounds() {
        assert!(lower(&[10, 12]).is_exclusive_with(&upper(&[1, 3])));
        assert!(!lower(&[1, 12]).is_exclusive_with(&upper(&[1, 3])));
    }

    #[test]
    fn test_same_formula_across_families() {
        assert!(one_of(&[3, 5]).same_formula(&one_of(&[5, 3])));
        assert!(!one_of(&[3]).same_formula(&lower(&[3])));
    }
}
