//! Program points: names, slots, the point registry and combined exits.

pub mod combine;
pub mod name;
pub mod point;
pub mod registry;
pub mod slot;

pub use combine::{combine_exits, CombinedRemap};
pub use name::{PointTag, PptName};
pub use point::{ProcessContext, ProcessStats, ProgramPoint};
pub use registry::PptRegistry;
pub use slot::VariableSlot;
