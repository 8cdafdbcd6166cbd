//! Error handling for invar.
//! One error enum per subsystem, `thiserror` only.

pub mod combine_error;
pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod observation_error;
pub mod pipeline_error;

pub use combine_error::CombineError;
pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::InvarErrorCode;
pub use observation_error::ObservationError;
pub use pipeline_error::{PipelineError, PipelineResult};
