//! InvarErrorCode trait for structured error reporting.

/// Every error enum provides a stable code string so that embedders can
/// branch on the failure class without parsing messages.
pub trait InvarErrorCode {
    /// Returns the error code string (e.g., "STRUCTURAL_MISMATCH").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }

    /// Whether the run must abort when this error is raised.
    fn is_fatal(&self) -> bool {
        true
    }
}

pub const STRUCTURAL_MISMATCH: &str = "STRUCTURAL_MISMATCH";
pub const NAME_COLLISION: &str = "NAME_COLLISION";
pub const ENGINE_INVARIANT_VIOLATION: &str = "ENGINE_INVARIANT_VIOLATION";
pub const MALFORMED_OBSERVATION: &str = "MALFORMED_OBSERVATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SINK_ERROR: &str = "SINK_ERROR";
