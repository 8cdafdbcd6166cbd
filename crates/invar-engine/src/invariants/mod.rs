//! Candidate invariants.
//!
//! Each family implements [`Candidate`]; [`InvariantKind`] closes the set and
//! [`Invariant`] binds a family instance to the slots of its point, owning
//! the lifecycle: fed, falsified, justified, annotated, filtered.

pub mod bounds;
pub mod candidate;
pub mod discard;
pub mod elt_one_of;
pub mod equality;
pub mod factory;
pub mod implication;
pub mod invariant;
pub mod justification;
pub mod kind;
pub mod linear;
pub mod nonzero;
pub mod one_of;
pub mod quotient;

pub use bounds::{LowerBound, UpperBound};
pub use candidate::{Candidate, Observed, Violation};
pub use discard::{DiscardCode, DiscardInfo};
pub use elt_one_of::EltOneOf;
pub use equality::Equality;
pub use factory::CandidateFactory;
pub use implication::Implication;
pub use invariant::{Invariant, VarRef};
pub use justification::{Justification, JustificationScorer};
pub use kind::InvariantKind;
pub use linear::Linear;
pub use nonzero::NonZero;
pub use one_of::OneOf;
pub use quotient::Quotient;
