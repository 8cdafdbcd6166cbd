//! Data types shared between the engine and its external collaborators.
//! Collection aliases, index-based identifiers, values, declarations.

pub mod collections;
pub mod decls;
pub mod identifiers;
pub mod value;

pub use collections::{FxHashMap, FxHashSet, SmallVec3};
pub use decls::{PointDecl, SlotKind, VarDecl};
pub use identifiers::{InvariantId, PptId};
pub use value::{ModBit, RepType, Value, ValueObservation};
