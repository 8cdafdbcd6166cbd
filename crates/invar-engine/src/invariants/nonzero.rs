//! `x != 0`, or `x != null` for references.

use invar_core::constants::PROBABILITY_UNKNOWN;
use invar_core::types::{SlotKind, Value};

use super::bounds::Extent;
use super::candidate::{int_operand, Candidate, Observed, Violation};
use super::justification::miss_probability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonZero {
    extent: Extent,
    kind: SlotKind,
}

impl NonZero {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            extent: Extent::default(),
            kind,
        }
    }

    pub fn has_samples(&self) -> bool {
        self.extent.samples() > 0
    }
}

impl Candidate for NonZero {
    fn class_name(&self) -> &'static str {
        "NonZero"
    }

    fn observe(&mut self, values: &[&Value], count: u32) -> Result<Observed, Violation> {
        let v = int_operand(values[0])?;
        if v == 0 {
            let what = if self.kind == SlotKind::Hashcode { "null" } else { "zero" };
            return Ok(Observed::Falsified(format!("observed {what}")));
        }
        self.extent.add(v, count);
        Ok(Observed::Updated)
    }

    fn probability(&self) -> Result<f64, Violation> {
        if !self.has_samples() {
            return Ok(PROBABILITY_UNKNOWN);
        }
        // References are null or not; integers could have hit zero anywhere
        // in a range one wider than the observed one.
        let range = match self.kind {
            SlotKind::Hashcode => 2.0,
            _ => self.extent.span() + 1.0,
        };
        Ok(miss_probability(self.extent.samples(), range))
    }

    fn format(&self, names: &[&str]) -> String {
        match self.kind {
            SlotKind::Hashcode => format!("{} != null", names[0]),
            _ => format!("{} != 0", names[0]),
        }
    }

    fn same_formula(&self, other: &Self) -> bool {
        self.kind == other.kind
    }

    fn repr(&self) -> String {
        format!(
            "range=[{}, {}] samples={}",
            self.extent.min(),
            self.extent.max(),
            self.extent.samples()
        )
    }
}
