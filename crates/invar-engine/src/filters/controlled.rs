//! Candidates already stated at a controlling point.

use invar_core::constants::FILTER_CONTROLLED;

use super::chain::{FilterContext, InvariantFilter};
use crate::invariants::{DiscardCode, Invariant};

pub struct ControlledFilter;

impl ControlledFilter {
    fn controlling_match<'a>(&self, invariant: &Invariant, ctx: &FilterContext<'a>) -> Option<&'a str> {
        ctx.point().controllers().iter().find_map(|id| {
            let controller = &ctx.registry[*id];
            controller
                .invariants()
                .iter()
                .any(|other| other.is_justified() && other.is_same_formula(invariant))
                .then(|| controller.name().as_str())
        })
    }
}

impl InvariantFilter for ControlledFilter {
    fn id(&self) -> &'static str {
        FILTER_CONTROLLED
    }

    fn description(&self) -> &'static str {
        "implied by a controlling point"
    }

    fn discard_code(&self) -> DiscardCode {
        DiscardCode::ControlCheck
    }

    fn should_discard(&self, invariant: &Invariant, ctx: &FilterContext<'_>) -> bool {
        self.controlling_match(invariant, ctx).is_some()
    }

    fn explain(&self, invariant: &Invariant, ctx: &FilterContext<'_>) -> String {
        match self.controlling_match(invariant, ctx) {
            Some(name) => format!("implied by controlling point {name}"),
            None => self.description().to_string(),
        }
    }
}
