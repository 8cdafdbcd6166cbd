//! Program point combination errors.

use super::error_code::{self, InvarErrorCode};

/// Errors raised while synthesizing combined exit points.
#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    #[error(
        "Exit {exit} of {entry} cannot be aligned to the combined schema: \
         consumed {consumed} of {expected} combined variables ({detail})"
    )]
    StructuralMismatch {
        entry: String,
        exit: String,
        consumed: usize,
        expected: usize,
        detail: String,
    },

    #[error("Combined exit {name} collides with a declared program point")]
    NameCollision { name: String },
}

impl InvarErrorCode for CombineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::StructuralMismatch { .. } => error_code::STRUCTURAL_MISMATCH,
            Self::NameCollision { .. } => error_code::NAME_COLLISION,
        }
    }
}
