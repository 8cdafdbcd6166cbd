//! `x == y` over two comparable slots of the same representation.

use invar_core::constants::{PROBABILITY_JUSTIFIED, PROBABILITY_UNKNOWN};
use invar_core::types::Value;

use super::candidate::{Candidate, Observed, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Equality {
    samples: u64,
}

impl Equality {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Candidate for Equality {
    fn class_name(&self) -> &'static str {
        "Equality"
    }

    fn observe(&mut self, values: &[&Value], count: u32) -> Result<Observed, Violation> {
        if values[0] != values[1] {
            return Ok(Observed::Falsified(format!("{} != {}", values[0], values[1])));
        }
        let first = self.samples == 0;
        self.samples += u64::from(count);
        Ok(if first { Observed::Updated } else { Observed::Unchanged })
    }

    fn probability(&self) -> Result<f64, Violation> {
        if self.samples == 0 {
            Ok(PROBABILITY_UNKNOWN)
        } else {
            Ok(PROBABILITY_JUSTIFIED)
        }
    }

    fn format(&self, names: &[&str]) -> String {
        format!("{} == {}", names[0], names[1])
    }

    fn same_formula(&self, _other: &Self) -> bool {
        true
    }

    fn repr(&self) -> String {
        format!("samples={}", self.samples)
    }
}
