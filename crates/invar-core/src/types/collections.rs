//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for candidate operand lists (one to three variables).
pub type SmallVec3<T> = SmallVec<[T; 3]>;
