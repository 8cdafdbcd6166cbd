//! `y == a * x + b` with integer coefficients.

use smallvec::SmallVec;

use invar_core::constants::PROBABILITY_UNJUSTIFIED;
use invar_core::types::Value;

use super::candidate::{int_operand, Candidate, Observed, Violation};
use super::justification::fit_probability;

/// Distinct x values remembered for scoring; more add nothing.
const DISTINCT_CAP: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fit {
    Empty,
    Point { x: i64, y: i64 },
    Line { a: i64, b: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linear {
    fit: Fit,
    distinct_x: SmallVec<[i64; DISTINCT_CAP]>,
}

impl Default for Linear {
    fn default() -> Self {
        Self {
            fit: Fit::Empty,
            distinct_x: SmallVec::new(),
        }
    }
}

impl Linear {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(a, b)` once two distinct x values fixed the line.
    pub fn coefficients(&self) -> Option<(i64, i64)> {
        match self.fit {
            Fit::Line { a, b } => Some((a, b)),
            _ => None,
        }
    }

    /// `y == x`, which the equality candidate already states.
    pub fn is_identity(&self) -> bool {
        self.coefficients() == Some((1, 0))
    }

    fn note_x(&mut self, x: i64) {
        if self.distinct_x.len() < DISTINCT_CAP && !self.distinct_x.contains(&x) {
            self.distinct_x.push(x);
        }
    }
}

fn line_through(x1: i64, y1: i64, x2: i64, y2: i64) -> Option<(i64, i64)> {
    let dx = x2.checked_sub(x1)?;
    let dy = y2.checked_sub(y1)?;
    if dy.checked_rem(dx)? != 0 {
        return None;
    }
    let a = dy.checked_div(dx)?;
    let b = y1.checked_sub(a.checked_mul(x1)?)?;
    Some((a, b))
}

impl Candidate for Linear {
    fn class_name(&self) -> &'static str {
        "LinearBinary"
    }

    fn observe(&mut self, values: &[&Value], _count: u32) -> Result<Observed, Violation> {
        let x = int_operand(values[0])?;
        let y = int_operand(values[1])?;
        match self.fit {
            Fit::Empty => {
                self.fit = Fit::Point { x, y };
            }
            Fit::Point { x: x1, y: y1 } if x1 == x => {
                if y1 != y {
                    return Ok(Observed::Falsified(format!("x = {x} maps to both {y1} and {y}")));
                }
                return Ok(Observed::Unchanged);
            }
            Fit::Point { x: x1, y: y1 } => match line_through(x1, y1, x, y) {
                Some((a, b)) => self.fit = Fit::Line { a, b },
                None => return Ok(Observed::Falsified("no integral line".to_string())),
            },
            Fit::Line { a, b } => {
                let expected = a.checked_mul(x).and_then(|ax| ax.checked_add(b));
                if expected != Some(y) {
                    return Ok(Observed::Falsified(format!("({x}, {y}) is off the line")));
                }
            }
        }
        let before = self.distinct_x.len();
        self.note_x(x);
        if self.distinct_x.len() == before && matches!(self.fit, Fit::Line { .. }) {
            return Ok(Observed::Unchanged);
        }
        Ok(Observed::Updated)
    }

    fn probability(&self) -> Result<f64, Violation> {
        // A flat line only restates a constant.
        if matches!(self.fit, Fit::Line { a: 0, .. }) {
            return Ok(PROBABILITY_UNJUSTIFIED);
        }
        Ok(fit_probability(self.distinct_x.len(), 2))
    }

    fn format(&self, names: &[&str]) -> String {
        let (x, y) = (names[0], names[1]);
        let Some((a, b)) = self.coefficients() else {
            return format!("{y} == ? * {x} + ?");
        };
        let mut rhs = match a {
            0 => String::new(),
            1 => x.to_string(),
            -1 => format!("-{x}"),
            a => format!("{a} * {x}"),
        };
        match (rhs.is_empty(), b) {
            (true, b) => rhs = b.to_string(),
            (false, 0) => {}
            (false, b) if b < 0 => rhs.push_str(&format!(" - {}", b.unsigned_abs())),
            (false, b) => rhs.push_str(&format!(" + {b}")),
        }
        format!("{y} == {rhs}")
    }

    fn same_formula(&self, other: &Self) -> bool {
        self.coefficients().is_some() && self.coefficients() == other.coefficients()
    }

    fn repr(&self) -> String {
        format!("{:?} distinct_x={}", self.fit, self.distinct_x.len())
    }
}
