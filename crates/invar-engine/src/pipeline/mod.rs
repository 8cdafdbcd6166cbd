//! The inference run: sources in, reports out.

pub mod emit;
pub mod hooks;
pub mod implications;
pub mod orchestrator;
pub mod sources;

pub use emit::{
    CollectingSink, EmissionSink, InferenceReport, PointReport, ReportedInvariant, RunStats,
    TextSink,
};
pub use hooks::{OneOfSuppression, RedundancyOracle, SuppressionPass, SuppressorAnnotation};
pub use implications::add_implications;
pub use orchestrator::InferencePipeline;
pub use sources::{parse_trace_lines, DeclarationSource, TraceRecord, TraceSource};
