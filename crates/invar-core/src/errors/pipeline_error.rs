//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, InvarErrorCode};
use super::{CombineError, ConfigError, EngineError, ObservationError};

/// Why an inference run stopped, or what it noted on the way.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("combining exits: {0}")]
    Combine(#[from] CombineError),

    #[error("inference: {0}")]
    Engine(#[from] EngineError),

    #[error("observation: {0}")]
    Observation(#[from] ObservationError),

    #[error("setup: {0}")]
    Config(#[from] ConfigError),

    #[error("emission sink: {0}")]
    Sink(String),
}

impl InvarErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Combine(e) => e.error_code(),
            Self::Engine(e) => e.error_code(),
            Self::Observation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Sink(_) => error_code::SINK_ERROR,
        }
    }

    fn is_fatal(&self) -> bool {
        match self {
            Self::Observation(e) => e.is_fatal(),
            _ => true,
        }
    }
}

/// Output of an inference run together with the recoverable problems met
/// on the way. Malformed values are treated as missing, and arity mismatches
/// are skipped; both end up in `errors`.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    pub data: T,
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// No observation was rejected or altered.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// The collected observation problems, in trace order.
    pub fn observation_errors(&self) -> impl Iterator<Item = &ObservationError> {
        self.errors.iter().filter_map(|e| match e {
            PipelineError::Observation(inner) => Some(inner),
            _ => None,
        })
    }

    pub fn into_parts(self) -> (T, Vec<PipelineError>) {
        (self.data, self.errors)
    }
}
