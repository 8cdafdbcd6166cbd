//! Candidates implied by the structure of the point itself.

use super::chain::{FilterContext, InvariantFilter};
use crate::invariants::{DiscardCode, Invariant};
use invar_core::constants::FILTER_OBVIOUS;

pub struct ObviousFilter;

impl InvariantFilter for ObviousFilter {
    fn id(&self) -> &'static str {
        FILTER_OBVIOUS
    }

    fn description(&self) -> &'static str {
        "obviously implied by other facts at the point"
    }

    fn discard_code(&self) -> DiscardCode {
        DiscardCode::Obvious
    }

    fn should_discard(&self, invariant: &Invariant, ctx: &FilterContext<'_>) -> bool {
        invariant.is_obvious_implied(ctx.point())
    }
}
