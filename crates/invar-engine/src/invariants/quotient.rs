//! `z == x / y`: integer division with truncation toward zero.

use smallvec::SmallVec;

use invar_core::constants::PROBABILITY_UNKNOWN;
use invar_core::types::Value;

use super::candidate::{int_operand, Candidate, Observed, Violation};
use super::justification::fit_probability;

const DISTINCT_CAP: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Quotient {
    samples: u64,
    distinct_inputs: SmallVec<[(i64, i64); DISTINCT_CAP]>,
}

impl Quotient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Candidate for Quotient {
    fn class_name(&self) -> &'static str {
        "Quotient"
    }

    /// Operands in `(x, y, z)` order.
    fn observe(&mut self, values: &[&Value], count: u32) -> Result<Observed, Violation> {
        let x = int_operand(values[0])?;
        let y = int_operand(values[1])?;
        let z = int_operand(values[2])?;
        if y == 0 {
            return Ok(Observed::Falsified("division by zero".to_string()));
        }
        let (Some(q), Some(r)) = (x.checked_div(y), x.checked_rem(y)) else {
            return Ok(Observed::Falsified("division overflows".to_string()));
        };
        // Truncating division must reconstruct its dividend.
        if q.checked_mul(y).and_then(|qy| qy.checked_add(r)) != Some(x) {
            return Err(Violation(format!("{q} * {y} + {r} != {x}")));
        }
        if z != q {
            return Ok(Observed::Falsified(format!("{x} / {y} is {q}, not {z}")));
        }
        self.samples += u64::from(count);
        if self.distinct_inputs.len() < DISTINCT_CAP && !self.distinct_inputs.contains(&(x, y)) {
            self.distinct_inputs.push((x, y));
        }
        Ok(Observed::Updated)
    }

    fn probability(&self) -> Result<f64, Violation> {
        if self.samples == 0 {
            return Ok(PROBABILITY_UNKNOWN);
        }
        Ok(fit_probability(self.distinct_inputs.len(), 1))
    }

    fn format(&self, names: &[&str]) -> String {
        format!("{} == {} / {}", names[2], names[0], names[1])
    }

    fn same_formula(&self, _other: &Self) -> bool {
        true
    }

    fn repr(&self) -> String {
        format!("samples={} distinct={}", self.samples, self.distinct_inputs.len())
    }
}
