use invar_core::constants::ONE_OF_LIMIT;
use invar_core::types::{SlotKind, Value};
use invar_engine::invariants::justification::miss_probability;
use invar_engine::invariants::{
    Candidate, InvariantKind, Justification, JustificationScorer, LowerBound, NonZero, Observed,
    OneOf, UpperBound,
};
use proptest::prelude::*;

fn fed_one_of(values: &[i64]) -> (OneOf, bool) {
    let mut one_of = OneOf::new(SlotKind::Plain);
    for v in values {
        if let Observed::Falsified(_) = one_of.observe(&[&Value::Int(*v)], 1).unwrap() {
            return (one_of, true);
        }
    }
    (one_of, false)
}

fn fed_kind(mut kind: InvariantKind, values: &[i64]) -> InvariantKind {
    for v in values {
        // Falsification leaves the state untouched, which is all we compare.
        let _ = kind.observe(&[&Value::Int(*v)], 1);
    }
    kind
}

fn arb_kind() -> impl Strategy<Value = (u8, Vec<i64>)> {
    (0u8..4, prop::collection::vec(-8i64..8, 0..6))
}

fn build((tag, values): (u8, Vec<i64>)) -> InvariantKind {
    let kind = match tag {
        0 => InvariantKind::OneOf(OneOf::new(SlotKind::Plain)),
        1 => InvariantKind::LowerBound(LowerBound::new()),
        2 => InvariantKind::UpperBound(UpperBound::new()),
        _ => InvariantKind::NonZero(NonZero::new(SlotKind::Plain)),
    };
    fed_kind(kind, &values)
}

// ── Value set tracks the distinct inputs ─────────────────────────────────

proptest! {
    #[test]
    fn survives_iff_within_limit(values in prop::collection::vec(-20i64..20, 1..30)) {
        let mut distinct = values.clone();
        distinct.sort_unstable();
        distinct.dedup();

        let (one_of, falsified) = fed_one_of(&values);
        prop_assert_eq!(falsified, distinct.len() > ONE_OF_LIMIT);
        if !falsified {
            prop_assert_eq!(one_of.values(), distinct.as_slice());
        }
        prop_assert!(one_of.num_elts() <= ONE_OF_LIMIT);
        prop_assert!(one_of.values().windows(2).all(|w| w[0] < w[1]));
    }
}

// ── Same formula ignores arrival order ───────────────────────────────────

proptest! {
    #[test]
    fn same_formula_order_insensitive(values in prop::collection::vec(-5i64..5, 1..20)) {
        let reversed: Vec<i64> = values.iter().rev().copied().collect();
        let (a, fa) = fed_one_of(&values);
        let (b, fb) = fed_one_of(&reversed);
        prop_assume!(!fa && !fb);
        prop_assert!(a.same_formula(&b));
        prop_assert_eq!(a.format(&["x"]), b.format(&["x"]));
    }
}

// ── Exclusivity is symmetric ─────────────────────────────────────────────

proptest! {
    #[test]
    fn exclusivity_symmetric(a in arb_kind(), b in arb_kind()) {
        let a = build(a);
        let b = build(b);
        prop_assert_eq!(a.is_exclusive_with(&b), b.is_exclusive_with(&a));
    }

    #[test]
    fn nothing_excludes_itself(a in arb_kind()) {
        let a = build(a);
        prop_assert!(!a.is_exclusive_with(&a));
    }
}

// ── Justification ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn miss_probability_in_unit_interval(samples in 1u64..500, range in 2u32..1000) {
        let p = miss_probability(samples, f64::from(range));
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn more_samples_never_raise_miss_probability(samples in 1u64..300, range in 2u32..100) {
        let range = f64::from(range);
        prop_assert!(miss_probability(samples + 1, range) <= miss_probability(samples, range));
    }

    #[test]
    fn classification_respects_limit(p in 0.0f64..1.0, limit in 0.0f64..1.0) {
        let scorer = JustificationScorer::new(limit);
        let expected = if p <= limit { Justification::Justified } else { Justification::Unjustified };
        prop_assert_eq!(scorer.classify(p), expected);
    }
}
