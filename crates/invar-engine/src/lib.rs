//! Invariant hypothesis engine.
//!
//! Program points are declared up front, sibling exits are merged into
//! combined exits, trace tuples are streamed into per-point candidate pools,
//! and the surviving justified candidates run through a filter chain before
//! being emitted.

pub mod derive;
pub mod filters;
pub mod invariants;
pub mod pipeline;
pub mod ppt;

pub use invariants::{DiscardCode, DiscardInfo, Invariant, InvariantKind, Justification};
pub use pipeline::{InferencePipeline, InferenceReport};
pub use ppt::{PptRegistry, ProgramPoint};
