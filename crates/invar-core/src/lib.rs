//! Foundation crate for invar: the shared error taxonomy, layered
//! configuration, tracing setup, constants and the data types exchanged with
//! the declaration/trace readers.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::InvarConfig;
pub use errors::{PipelineError, PipelineResult};
