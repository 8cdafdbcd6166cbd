//! Configuration errors. Fatal at startup, before any point is processed.

use super::error_code::{self, InvarErrorCode};

/// Anything wrong with the run setup rather than with a single observation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration {path}")]
    FileNotFound { path: String },

    #[error("malformed configuration {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("{field} out of range: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("bad value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("{kind} {name} declared twice")]
    DuplicateRegistration { kind: String, name: String },

    #[error("trace refers to undeclared program point {name}")]
    UndeclaredPoint { name: String },
}

impl InvarErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
