//! Malformed observation errors. Recovered locally: the value is treated as
//! missing for that observation.

use super::error_code::{self, InvarErrorCode};

/// Errors raised while coercing trace values to slot representation types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObservationError {
    #[error("Value {value} of {variable} at {point} is not a valid {expected}")]
    Malformed {
        point: String,
        variable: String,
        value: String,
        expected: String,
    },

    #[error("Observation at {point} has {found} values, expected {expected}")]
    ArityMismatch {
        point: String,
        found: usize,
        expected: usize,
    },
}

impl InvarErrorCode for ObservationError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_OBSERVATION
    }

    fn is_fatal(&self) -> bool {
        false
    }
}
