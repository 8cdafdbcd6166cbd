//! Candidates flagged by the redundancy oracle.

use invar_core::constants::FILTER_REDUNDANT;

use super::chain::{FilterContext, InvariantFilter};
use crate::invariants::{DiscardCode, Invariant};

pub struct RedundancyFilter;

impl InvariantFilter for RedundancyFilter {
    fn id(&self) -> &'static str {
        FILTER_REDUNDANT
    }

    fn description(&self) -> &'static str {
        "redundant with other reported candidates"
    }

    fn discard_code(&self) -> DiscardCode {
        DiscardCode::Redundant
    }

    fn should_discard(&self, invariant: &Invariant, _ctx: &FilterContext<'_>) -> bool {
        invariant.is_redundant()
    }
}
