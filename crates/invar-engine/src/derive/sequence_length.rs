//! `size(a)` and `size(a)-1`.

use invar_core::types::{ModBit, Value};

use super::missing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceLength {
    /// Slot holding the sequence.
    pub base: usize,
    /// Added to the length; 0 or -1.
    pub shift: i64,
}

impl SequenceLength {
    pub fn new(base: usize, shift: i64) -> Self {
        Self { base, shift }
    }

    pub fn compute(&self, row: &[(Value, ModBit)]) -> (Value, ModBit) {
        let Some((value, modbit)) = row.get(self.base) else {
            return missing();
        };
        if modbit.is_missing() {
            return missing();
        }
        match value.array_len() {
            Some(len) => (Value::Int(len as i64 + self.shift), *modbit),
            None => missing(),
        }
    }

    pub fn name(&self, sequence: &str) -> String {
        match self.shift {
            0 => format!("size({sequence})"),
            shift if shift < 0 => format!("size({sequence}){shift}"),
            shift => format!("size({sequence})+{shift}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_follows_base() {
        let row = vec![(Value::IntArray(vec![1, 2, 3]), ModBit::Unmodified)];
        assert_eq!(
            SequenceLength::new(0, 0).compute(&row),
            (Value::Int(3), ModBit::Unmodified)
        );
        assert_eq!(
            SequenceLength::new(0, -1).compute(&row),
            (Value::Int(2), ModBit::Unmodified)
        );
    }

    #[test]
    fn test_missing_base() {
        let row = vec![(Value::Null, ModBit::Missing)];
        assert!(SequenceLength::new(0, 0).compute(&row).1.is_missing());
        assert_eq!(SequenceLength::new(0, -1).name("a[]"), "size(a[])-1");
    }
}
