//! The capability every candidate family implements.

use invar_core::types::Value;

/// Outcome of feeding one tuple to a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    /// State did not change; a cached justification stays valid.
    Unchanged,
    Updated,
    /// The tuple contradicts the candidate. Carries the reason.
    Falsified(String),
}

/// A state the family forbids. Raised as an engine invariant violation by
/// the owning [`Invariant`](super::Invariant), which adds operand context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation(pub String);

/// Family-level behaviour of a candidate invariant.
///
/// Families never see variable names except when formatting; the wrapping
/// `Invariant` owns the variable references.
pub trait Candidate {
    fn class_name(&self) -> &'static str;

    /// Feed one tuple. `values` holds one value per variable, in the
    /// candidate's variable order. A falsified family must not have been
    /// mutated by the call.
    fn observe(&mut self, values: &[&Value], count: u32) -> Result<Observed, Violation>;

    /// Probability that the observed pattern is coincidental. Uses the
    /// `PROBABILITY_*` sentinels for the degenerate cases.
    fn probability(&self) -> Result<f64, Violation>;

    fn format(&self, names: &[&str]) -> String;

    /// Same family and same parameters.
    fn same_formula(&self, other: &Self) -> bool;

    /// Compact rendering of the accumulated state, for diagnostics.
    fn repr(&self) -> String;
}

/// Integer payload of an int or hashcode operand.
pub(crate) fn int_operand(value: &Value) -> Result<i64, Violation> {
    value
        .as_int()
        .ok_or_else(|| Violation(format!("expected an integer operand, got {value}")))
}

/// `{ 1, 2, 3 }`
pub(crate) fn set_text(values: &[i64]) -> String {
    if values.is_empty() {
        return "{ }".to_string();
    }
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("{{ {} }}", parts.join(", "))
}
