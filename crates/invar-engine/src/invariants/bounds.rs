//! `x >= c` and `x <= c` over integer scalars.

use invar_core::constants::{PROBABILITY_UNJUSTIFIED, PROBABILITY_UNKNOWN};
use invar_core::types::Value;

use super::candidate::{int_operand, Candidate, Observed, Violation};
use super::justification::miss_probability;

/// Observed range of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    min: i64,
    max: i64,
    samples: u64,
}

impl Extent {
    pub fn add(&mut self, v: i64, count: u32) {
        if self.samples == 0 {
            self.min = v;
            self.max = v;
        } else {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
        self.samples += u64::from(count);
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of integers in `[min, max]`.
    pub fn span(&self) -> f64 {
        (i128::from(self.max) - i128::from(self.min) + 1) as f64
    }

    /// Probability for a bound at one end of this extent.
    fn bound_probability(&self) -> f64 {
        if self.samples == 0 {
            PROBABILITY_UNKNOWN
        } else if self.span() <= 1.0 {
            // A constant: the one-of candidate states it better.
            PROBABILITY_UNJUSTIFIED
        } else {
            miss_probability(self.samples, self.span())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LowerBound {
    extent: Extent,
}

impl LowerBound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(&self) -> i64 {
        self.extent.min()
    }

    pub fn has_samples(&self) -> bool {
        self.extent.samples() > 0
    }
}

impl Candidate for LowerBound {
    fn class_name(&self) -> &'static str {
        "LowerBound"
    }

    fn observe(&mut self, values: &[&Value], count: u32) -> Result<Observed, Violation> {
        self.extent.add(int_operand(values[0])?, count);
        Ok(Observed::Updated)
    }

    fn probability(&self) -> Result<f64, Violation> {
        Ok(self.extent.bound_probability())
    }

    fn format(&self, names: &[&str]) -> String {
        format!("{} >= {}", names[0], self.extent.min())
    }

    fn same_formula(&self, other: &Self) -> bool {
        self.has_samples() && other.has_samples() && self.min() == other.min()
    }

    fn repr(&self) -> String {
        format!("min={} samples={}", self.extent.min(), self.extent.samples())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpperBound {
    extent: Extent,
}

impl UpperBound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max(&self) -> i64 {
        self.extent.max()
    }

    pub fn has_samples(&self) -> bool {
        self.extent.samples() > 0
    }
}

impl Candidate for UpperBound {
    fn class_name(&self) -> &'static str {
        "UpperBound"
    }

    fn observe(&mut self, values: &[&Value], count: u32) -> Result<Observed, Violation> {
        self.extent.add(int_operand(values[0])?, count);
        Ok(Observed::Updated)
    }

    fn probability(&self) -> Result<f64, Violation> {
        Ok(self.extent.bound_probability())
    }

    fn format(&self, names: &[&str]) -> String {
        format!("{} <= {}", names[0], self.extent.max())
    }

    fn same_formula(&self, other: &Self) -> bool {
        self.has_samples() && other.has_samples() && self.max() == other.max()
    }

    fn repr(&self) -> String {
        format!("max={} samples={}", self.extent.max(), self.extent.samples())
    }
}
