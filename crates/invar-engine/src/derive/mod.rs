//! Derived variables: values computed from declared slots before any
//! candidate sees the tuple.
//!
//! Derived slots are appended after the declared slots of a point the first
//! time the point is processed; each derived value is recomputed from the
//! full row of the observation being fed.

pub mod sequence_length;
pub mod sequence_subscript;

pub use sequence_length::SequenceLength;
pub use sequence_subscript::SequenceSubscript;

use invar_core::types::{ModBit, RepType, SlotKind, Value};

use crate::ppt::VariableSlot;

/// Value and flag of a slot that has nothing to contribute.
pub(crate) fn missing() -> (Value, ModBit) {
    (Value::Null, ModBit::Missing)
}

/// How a derived slot computes its value from earlier slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    Length(SequenceLength),
    Subscript(SequenceSubscript),
}

impl Derivation {
    /// Compute the derived value from the row of slot values computed so far.
    pub fn compute(&self, row: &[(Value, ModBit)]) -> (Value, ModBit) {
        match self {
            Self::Length(d) => d.compute(row),
            Self::Subscript(d) => d.compute(row),
        }
    }

    /// `size(a)-1` and friends: lengths that are shifted off their natural
    /// zero, whose constants say nothing new.
    pub fn is_shifted_length(&self) -> bool {
        matches!(self, Self::Length(d) if d.shift != 0)
    }
}

/// Build the derived slots for a point whose declared slots are `slots`.
///
/// Lengths are derived for every sequence; subscripts for every sequence
/// paired with every plain integer slot comparable to it.
pub fn derive_slots(slots: &[VariableSlot], ignore_comparability: bool) -> Vec<VariableSlot> {
    let mut derived = Vec::new();
    let mut next = slots.len();
    let eligible = |s: &&VariableSlot| !s.omitted && !s.is_derived();

    for seq in slots.iter().filter(eligible).filter(|s| s.rep_type.is_array()) {
        for shift in [0, -1] {
            let length = SequenceLength::new(seq.index, shift);
            derived.push(VariableSlot::derived(
                next,
                length.name(&seq.name),
                RepType::Int,
                SlotKind::Plain,
                &seq.comparability,
                Derivation::Length(length),
            ));
            next += 1;
        }
    }

    for seq in slots.iter().filter(eligible).filter(|s| s.rep_type.is_array()) {
        let Some(element_type) = seq.rep_type.element_type() else {
            continue;
        };
        for index in slots
            .iter()
            .filter(eligible)
            .filter(|s| s.is_plain_int() && s.comparable_with(seq, ignore_comparability))
        {
            for shift in [0, -1] {
                let subscript = SequenceSubscript::new(seq.index, index.index, shift);
                derived.push(VariableSlot::derived(
                    next,
                    subscript.name(&seq.name, &index.name),
                    element_type,
                    SlotKind::Plain,
                    &seq.comparability,
                    Derivation::Subscript(subscript),
                ));
                next += 1;
            }
        }
    }

    derived
}
