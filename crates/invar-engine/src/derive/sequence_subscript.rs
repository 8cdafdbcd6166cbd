//! `a[i]` and `a[i-1]`: a sequence element selected by an integer slot.

use invar_core::types::{ModBit, Value};

use super::missing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSubscript {
    pub sequence: usize,
    pub index: usize,
    /// Added to the index value; 0 or -1.
    pub shift: i64,
}

impl SequenceSubscript {
    pub fn new(sequence: usize, index: usize, shift: i64) -> Self {
        Self {
            sequence,
            index,
            shift,
        }
    }

    /// Out-of-range subscripts yield a missing value. The result is
    /// unmodified only when both inputs are.
    pub fn compute(&self, row: &[(Value, ModBit)]) -> (Value, ModBit) {
        let (Some((seq, seq_mod)), Some((index, index_mod))) =
            (row.get(self.sequence), row.get(self.index))
        else {
            return missing();
        };
        let modbit = seq_mod.combine(*index_mod);
        if modbit.is_missing() {
            return missing();
        }
        let Some(position) = index.as_int().and_then(|i| i.checked_add(self.shift)) else {
            return missing();
        };
        let Ok(position) = usize::try_from(position) else {
            return missing();
        };
        match seq.element(position) {
            Some(element) => (element, modbit),
            None => missing(),
        }
    }

    pub fn name(&self, sequence: &str, index: &str) -> String {
        let base = sequence.strip_suffix("[]").unwrap_or(sequence);
        match self.shift {
            0 => format!("{base}[{index}]"),
            shift if shift < 0 => format!("{base}[{index}{shift}]"),
            shift => format!("{base}[{index}+{shift}]"),
        }
    }
}
