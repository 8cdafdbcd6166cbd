//! Candidates that only relate constants.

use invar_core::constants::FILTER_ONLY_CONSTANT;

use super::chain::{FilterContext, InvariantFilter};
use crate::invariants::{DiscardCode, Invariant, InvariantKind, VarRef};
use crate::ppt::ProgramPoint;

pub struct OnlyConstantVariablesFilter;

/// Static, never varied, or pinned by a live single-value one-of.
fn is_constant(var: &VarRef, point: &ProgramPoint) -> bool {
    point.is_constant_slot(var.slot)
        || point.invariants().iter().any(|inv| {
            inv.vars().len() == 1
                && inv.vars()[0].slot == var.slot
                && inv.kind().as_one_of().is_some_and(|o| o.is_single_constant())
        })
}

impl InvariantFilter for OnlyConstantVariablesFilter {
    fn id(&self) -> &'static str {
        FILTER_ONLY_CONSTANT
    }

    fn description(&self) -> &'static str {
        "all variables are constant"
    }

    fn discard_code(&self) -> DiscardCode {
        DiscardCode::OnlyConstantVars
    }

    fn should_discard(&self, invariant: &Invariant, ctx: &FilterContext<'_>) -> bool {
        // Equalities and one-ofs are how constants get reported. The
        // exemption is for the candidate itself: an implication whose
        // consequent is a one-of over a constant is still dropped, the
        // unconditional one-of already says it.
        if matches!(
            invariant.kind(),
            InvariantKind::Equality(_) | InvariantKind::OneOf(_) | InvariantKind::EltOneOf(_)
        ) {
            return false;
        }
        let target = invariant.consequent().unwrap_or(invariant);
        let point = ctx.point();
        !target.vars().is_empty() && target.vars().iter().all(|v| is_constant(v, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::{LowerBound, NonZero, OneOf, VarRef};
    use crate::ppt::{PptRegistry, ProcessContext};
    use invar_core::config::PointSelector;
    use invar_core::types::{
        InvariantId, PointDecl, PptId, RepType, SlotKind, Value, ValueObservation, VarDecl,
    };

    /// `c` stays at 4 while `y` walks 1..=20.
    fn constant_and_varying() -> (PptRegistry, PptId) {
        let decl = PointDecl::new(
            "F.f():::ENTER",
            vec![VarDecl::new("c", "int", RepType::Int), VarDecl::new("y", "int", RepType::Int)],
        );
        let mut reg = PptRegistry::new();
        let id = reg.declare(&decl, &PointSelector::default()).unwrap().unwrap();
        for y in 1..=20 {
            let obs = ValueObservation::modified([Value::Int(4), Value::Int(y)]);
            assert!(reg.record("F.f():::ENTER", obs).unwrap().is_empty());
        }
        reg[id].process(&ProcessContext::default()).unwrap();
        (reg, id)
    }

    fn fed(id: usize, slot: usize, name: &str, kind: InvariantKind, value: i64) -> Invariant {
        let mut inv = Invariant::new(
            InvariantId::new(id),
            [VarRef::new(slot, name)].into_iter().collect(),
            kind,
        );
        inv.observe(&[&Value::Int(value)], 1).unwrap();
        inv
    }

    #[test]
    fn test_constant_antecedent_is_allowed() {
        let (reg, id) = constant_and_varying();
        let ctx = FilterContext::new(&reg, id);
        let filter = OnlyConstantVariablesFilter;

        let antecedent = fed(100, 0, "c", InvariantKind::OneOf(OneOf::new(SlotKind::Plain)), 4);
        let consequent = fed(101, 1, "y", InvariantKind::LowerBound(LowerBound::new()), 1);
        let imp = Invariant::implication(InvariantId::new(102), antecedent, consequent);
        assert_eq!(imp.format(), "(c == 4) ==> (y >= 1)");
        assert!(!filter.should_discard(&imp, &ctx));
    }

    #[test]
    fn test_constant_consequent_is_discarded() {
        let (reg, id) = constant_and_varying();
        let ctx = FilterContext::new(&reg, id);
        let filter = OnlyConstantVariablesFilter;

        let antecedent = fed(100, 1, "y", InvariantKind::OneOf(OneOf::new(SlotKind::Plain)), 3);
        let consequent = fed(101, 0, "c", InvariantKind::NonZero(NonZero::new(SlotKind::Plain)), 4);
        let imp = Invariant::implication(InvariantId::new(102), antecedent, consequent);
        assert!(filter.should_discard(&imp, &ctx));
    }

    #[test]
    fn test_one_of_exemption_does_not_reach_consequent() {
        let (reg, id) = constant_and_varying();
        let ctx = FilterContext::new(&reg, id);
        let filter = OnlyConstantVariablesFilter;

        let plain = fed(100, 0, "c", InvariantKind::OneOf(OneOf::new(SlotKind::Plain)), 4);
        assert!(!filter.should_discard(&plain, &ctx));

        let antecedent = fed(101, 1, "y", InvariantKind::OneOf(OneOf::new(SlotKind::Plain)), 3);
        let imp = Invariant::implication(InvariantId::new(102), antecedent, plain);
        assert_eq!(imp.format(), "(y == 3) ==> (c == 4)");
        assert!(filter.should_discard(&imp, &ctx));
    }
}
