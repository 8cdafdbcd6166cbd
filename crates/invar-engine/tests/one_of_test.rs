//! OneOf lifecycle through the `Invariant` wrapper: accumulation, limits,
//! justification, formatting and the same-formula / exclusivity relations.

use smallvec::smallvec;

use invar_core::constants::ONE_OF_LIMIT;
use invar_core::errors::EngineError;
use invar_core::types::{InvariantId, SlotKind, Value};
use invar_engine::invariants::{
    DiscardCode, EltOneOf, Invariant, InvariantKind, Justification, JustificationScorer,
    LowerBound, NonZero, OneOf, UpperBound, VarRef,
};

fn unary(id: usize, name: &str, kind: InvariantKind) -> Invariant {
    Invariant::new(InvariantId::new(id), smallvec![VarRef::new(0, name)], kind)
}

fn one_of(name: &str, slot_kind: SlotKind) -> Invariant {
    unary(0, name, InvariantKind::OneOf(OneOf::new(slot_kind)))
}

fn feed_all(inv: &mut Invariant, values: &[i64]) {
    for v in values {
        inv.observe(&[&Value::Int(*v)], 1).unwrap();
    }
}

#[test]
fn test_constant_stream_formats_as_equality() {
    let mut inv = one_of("x", SlotKind::Plain);
    feed_all(&mut inv, &[3, 3, 3]);
    assert_eq!(inv.justify(&JustificationScorer::default()).unwrap(), Justification::Justified);
    assert_eq!(inv.format(), "x == 3");
}

#[test]
fn test_two_values_format_sorted() {
    let mut inv = one_of("x", SlotKind::Plain);
    feed_all(&mut inv, &[5, 3, 5, 3]);
    assert_eq!(inv.format(), "x one of { 3, 5 }");
}

#[test]
fn test_limit_plus_one_destroys() {
    let mut inv = one_of("x", SlotKind::Plain);
    let values: Vec<i64> = (1..=ONE_OF_LIMIT as i64).collect();
    feed_all(&mut inv, &values);
    assert!(!inv.is_destroyed());
    let info = inv.observe(&[&Value::Int(99)], 1).unwrap().unwrap();
    assert!(inv.is_destroyed());
    assert_eq!(info.code(), DiscardCode::BadSample);
    assert_eq!(info.class_name(), "OneOf");
}

#[test]
fn test_boolean_and_null_formats() {
    let mut flag = one_of("done", SlotKind::Boolean);
    feed_all(&mut flag, &[0, 0]);
    assert_eq!(flag.format(), "done == false");

    let mut ptr = one_of("next", SlotKind::Hashcode);
    feed_all(&mut ptr, &[0]);
    assert_eq!(ptr.format(), "next == null");
}

#[test]
fn test_nullable_reference_is_alive_but_unjustified() {
    let mut inv = one_of("p", SlotKind::Hashcode);
    feed_all(&mut inv, &[5, 0]);
    assert!(!inv.is_destroyed());
    assert_eq!(inv.justify(&JustificationScorer::default()).unwrap(), Justification::Unjustified);
    inv.observe(&[&Value::Int(9)], 1).unwrap();
    assert!(inv.is_destroyed());
}

#[test]
fn test_non_integer_operand_is_engine_violation() {
    let mut inv = one_of("x", SlotKind::Plain);
    let err = inv.observe(&[&Value::Float(1.5)], 1).unwrap_err();
    assert!(matches!(err, EngineError::InvariantViolation { ref class, .. } if class == "OneOf"));
}

#[test]
fn test_unknown_without_samples() {
    let mut inv = one_of("x", SlotKind::Plain);
    assert_eq!(inv.justify(&JustificationScorer::default()).unwrap(), Justification::Unknown);
    assert!(!inv.is_justified());
}

#[test]
fn test_same_formula_is_order_insensitive() {
    let mut a = one_of("x", SlotKind::Plain);
    let mut b = one_of("x", SlotKind::Plain);
    feed_all(&mut a, &[1, 7, 4]);
    feed_all(&mut b, &[4, 4, 1, 7]);
    assert!(a.is_same_formula(&b));
    feed_all(&mut b, &[8]);
    assert!(!a.is_same_formula(&b));
}

#[test]
fn test_exclusive_with_zero_and_nonzero() {
    let mut zero = one_of("x", SlotKind::Plain);
    feed_all(&mut zero, &[0]);
    let mut nonzero = unary(1, "x", InvariantKind::NonZero(NonZero::new(SlotKind::Plain)));
    feed_all(&mut nonzero, &[4, 9]);
    assert!(zero.is_exclusive_formula(&nonzero));
    assert!(nonzero.is_exclusive_formula(&zero));
}

#[test]
fn test_exclusive_with_bounds() {
    let mut small = one_of("x", SlotKind::Plain);
    feed_all(&mut small, &[1, 2]);
    let mut lower = unary(1, "x", InvariantKind::LowerBound(LowerBound::new()));
    feed_all(&mut lower, &[5, 8]);
    let mut upper = unary(2, "x", InvariantKind::UpperBound(UpperBound::new()));
    feed_all(&mut upper, &[-4, 0]);
    assert!(small.is_exclusive_formula(&lower));
    assert!(small.is_exclusive_formula(&upper));

    let mut other_var = unary(3, "y", InvariantKind::LowerBound(LowerBound::new()));
    feed_all(&mut other_var, &[5, 8]);
    assert!(!small.is_exclusive_formula(&other_var));
}

#[test]
fn test_not_exclusive_when_overlapping() {
    let mut a = one_of("x", SlotKind::Plain);
    let mut b = one_of("x", SlotKind::Plain);
    feed_all(&mut a, &[1, 2]);
    feed_all(&mut b, &[2, 3]);
    assert!(!a.is_exclusive_formula(&b));
}

#[test]
fn test_elt_one_of_formats() {
    let mut inv = unary(0, "a[]", InvariantKind::EltOneOf(EltOneOf::new()));
    inv.observe(&[&Value::IntArray(vec![2, 2])], 1).unwrap();
    assert_eq!(inv.format(), "a[] elements == 2");
}
