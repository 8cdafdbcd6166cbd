//! Configuration system for invar.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.
//! The resolved value is immutable and threaded into the orchestrator.

pub mod filter_config;
pub mod inference_config;
pub mod invar_config;
pub mod output_config;
pub mod points_config;

pub use filter_config::FilterConfig;
pub use inference_config::InferenceConfig;
pub use invar_config::{CliOverrides, InvarConfig};
pub use output_config::OutputConfig;
pub use points_config::{PointSelector, PointsConfig};
