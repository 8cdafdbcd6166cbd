//! Index-based ID types.
//!
//! Each ID wraps a `u32` arena index; a `PptId` cannot be used where an
//! `InvariantId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID from an arena index. Indices past `u32::MAX`
            /// saturate; use [`Self::try_new`] where the arena is unbounded.
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize, "arena index {index} exceeds u32");
                Self::try_new(index).unwrap_or(Self(u32::MAX))
            }

            /// `None` when `index` does not fit in a `u32`.
            pub fn try_new(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map(Self)
            }

            /// Get the arena index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self::new(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Program point index in the point registry.
    PptId,
    "ppt#"
);

define_id!(
    /// Candidate index within its owning program point.
    InvariantId,
    "inv#"
);
