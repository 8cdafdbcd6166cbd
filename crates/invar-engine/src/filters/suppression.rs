//! Candidates entailed by a simpler candidate.

use invar_core::constants::FILTER_SUPPRESSED;

use super::chain::{FilterContext, InvariantFilter};
use crate::invariants::{DiscardCode, Invariant};

pub struct SuppressionFilter;

impl InvariantFilter for SuppressionFilter {
    fn id(&self) -> &'static str {
        FILTER_SUPPRESSED
    }

    fn description(&self) -> &'static str {
        "implied by a simpler candidate"
    }

    fn discard_code(&self) -> DiscardCode {
        DiscardCode::Implied
    }

    /// For an implication, only its consequent's suppression counts.
    fn should_discard(&self, invariant: &Invariant, _ctx: &FilterContext<'_>) -> bool {
        match invariant.consequent() {
            Some(consequent) => consequent.suppressor().is_some(),
            None => invariant.suppressor().is_some(),
        }
    }

    fn explain(&self, invariant: &Invariant, ctx: &FilterContext<'_>) -> String {
        let target = invariant.consequent().unwrap_or(invariant);
        match target.suppressor().and_then(|id| ctx.point().invariant(id)) {
            Some(suppressor) => format!("suppressed by: {}", suppressor.format()),
            None => self.description().to_string(),
        }
    }
}
