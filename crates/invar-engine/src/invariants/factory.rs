//! Instantiation of the initial candidate pool over a point's slots.

use smallvec::smallvec;

use invar_core::config::InferenceConfig;
use invar_core::types::{RepType, SlotKind, SmallVec3};

use super::bounds::{LowerBound, UpperBound};
use super::elt_one_of::EltOneOf;
use super::equality::Equality;
use super::invariant::VarRef;
use super::kind::InvariantKind;
use super::linear::Linear;
use super::nonzero::NonZero;
use super::one_of::OneOf;
use super::quotient::Quotient;
use crate::ppt::VariableSlot;

/// Builds every admissible candidate for a slot list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateFactory {
    ignore_comparability: bool,
    disable_ternary: bool,
}

impl CandidateFactory {
    pub fn new(ignore_comparability: bool, disable_ternary: bool) -> Self {
        Self {
            ignore_comparability,
            disable_ternary,
        }
    }

    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(
            config.effective_ignore_comparability(),
            config.effective_disable_ternary(),
        )
    }

    /// Unary candidates per slot, then binary per comparable pair, then
    /// ternary per comparable triple. Static constants and omitted slots
    /// take part in none.
    pub fn candidates(&self, slots: &[VariableSlot]) -> Vec<(SmallVec3<VarRef>, InvariantKind)> {
        let usable: Vec<&VariableSlot> = slots
            .iter()
            .filter(|s| !s.omitted && !s.is_static_constant())
            .collect();
        let mut out = Vec::new();

        for slot in &usable {
            let vars: SmallVec3<VarRef> = smallvec![var(slot)];
            for kind in unary_kinds(slot) {
                out.push((vars.clone(), kind));
            }
        }

        for (i, x) in usable.iter().enumerate() {
            for y in &usable[i + 1..] {
                if x.rep_type != y.rep_type || !self.comparable(x, y) {
                    continue;
                }
                let vars: SmallVec3<VarRef> = smallvec![var(x), var(y)];
                out.push((vars.clone(), InvariantKind::Equality(Equality::new())));
                if x.is_plain_int() && y.is_plain_int() {
                    out.push((vars, InvariantKind::Linear(Linear::new())));
                }
            }
        }

        if !self.disable_ternary {
            let ints: Vec<&VariableSlot> = usable.iter().copied().filter(|s| s.is_plain_int()).collect();
            for (i, a) in ints.iter().enumerate() {
                for (j, b) in ints.iter().enumerate().skip(i + 1) {
                    if !self.comparable(a, b) {
                        continue;
                    }
                    for c in &ints[j + 1..] {
                        if !self.comparable(a, c) || !self.comparable(b, c) {
                            continue;
                        }
                        // Every assignment of the three slots to (x, y, z).
                        for (x, y, z) in [(a, b, c), (b, a, c), (a, c, b), (c, a, b), (b, c, a), (c, b, a)] {
                            out.push((
                                smallvec![var(x), var(y), var(z)],
                                InvariantKind::Quotient(Quotient::new()),
                            ));
                        }
                    }
                }
            }
        }

        out
    }

    fn comparable(&self, a: &VariableSlot, b: &VariableSlot) -> bool {
        a.comparable_with(b, self.ignore_comparability)
    }
}

fn var(slot: &VariableSlot) -> VarRef {
    VarRef::new(slot.index, slot.name.clone())
}

fn unary_kinds(slot: &VariableSlot) -> Vec<InvariantKind> {
    match (slot.rep_type, slot.kind) {
        (RepType::Int, SlotKind::Plain) => vec![
            InvariantKind::OneOf(OneOf::new(SlotKind::Plain)),
            InvariantKind::LowerBound(LowerBound::new()),
            InvariantKind::UpperBound(UpperBound::new()),
            InvariantKind::NonZero(NonZero::new(SlotKind::Plain)),
        ],
        (RepType::Int, SlotKind::Boolean) => vec![InvariantKind::OneOf(OneOf::new(SlotKind::Boolean))],
        (RepType::Int | RepType::Hashcode, _) => vec![
            InvariantKind::OneOf(OneOf::new(SlotKind::Hashcode)),
            InvariantKind::NonZero(NonZero::new(SlotKind::Hashcode)),
        ],
        (RepType::IntArray, _) => vec![InvariantKind::EltOneOf(EltOneOf::new())],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invar_core::types::{Value, VarDecl};

    fn slot(index: usize, decl: VarDecl) -> VariableSlot {
        VariableSlot::from_decl(index, &decl, Some(index), false)
    }

    fn classes(cands: &[(SmallVec3<VarRef>, InvariantKind)]) -> Vec<&'static str> {
        cands.iter().map(|(_, k)| k.class_name()).collect()
    }

    #[test]
    fn test_unary_by_slot_kind() {
        let factory = CandidateFactory::default();
        let cands = factory.candidates(&[slot(0, VarDecl::new("b", "boolean", RepType::Int))]);
        assert_eq!(classes(&cands), vec!["OneOf"]);
        let cands = factory.candidates(&[slot(0, VarDecl::new("p", "Node", RepType::Hashcode))]);
        assert_eq!(classes(&cands), vec!["OneOf", "NonZero"]);
        let cands = factory.candidates(&[slot(0, VarDecl::new("s", "java.lang.String", RepType::String))]);
        assert!(cands.is_empty());
    }

    #[test]
    fn test_constants_and_incomparable_pairs_skipped() {
        let factory = CandidateFactory::default();
        let slots = vec![
            slot(0, VarDecl::new("x", "int", RepType::Int).with_comparability("1")),
            slot(1, VarDecl::new("y", "int", RepType::Int).with_comparability("2")),
            slot(2, VarDecl::new("K", "int", RepType::Int).with_constant(Value::Int(4))),
        ];
        let cands = factory.candidates(&slots);
        assert!(cands.iter().all(|(vars, _)| vars.len() == 1));
        assert!(cands.iter().all(|(vars, _)| vars[0].name != "K"));

        let cands = CandidateFactory::new(true, false).candidates(&slots);
        assert_eq!(cands.iter().filter(|(vars, _)| vars.len() == 2).count(), 2);
    }

    #[test]
    fn test_ternary_permutations() {
        let slots: Vec<VariableSlot> = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, n)| slot(i, VarDecl::new(*n, "int", RepType::Int)))
            .collect();
        let cands = CandidateFactory::default().candidates(&slots);
        assert_eq!(classes(&cands).iter().filter(|c| **c == "Quotient").count(), 6);
        let cands = CandidateFactory::new(false, true).candidates(&slots);
        assert!(!classes(&cands).contains(&"Quotient"));
    }
}
