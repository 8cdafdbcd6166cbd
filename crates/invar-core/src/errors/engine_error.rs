//! Engine invariant violations: internal contradictions that indicate an
//! algorithm bug rather than bad input.

use super::error_code::{self, InvarErrorCode};

/// Errors raised when a candidate reaches a state the engine forbids.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine invariant violated by {class} over [{operands}]: {detail}")]
    InvariantViolation {
        /// Candidate family name.
        class: String,
        /// Comma separated operand description (names and values).
        operands: String,
        detail: String,
    },
}

impl EngineError {
    pub fn violation(
        class: impl Into<String>,
        operands: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvariantViolation {
            class: class.into(),
            operands: operands.into(),
            detail: detail.into(),
        }
    }
}

impl InvarErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        error_code::ENGINE_INVARIANT_VIOLATION
    }
}
