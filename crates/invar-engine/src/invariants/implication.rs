//! `(A) ==> (B)`: a predicate that holds on one exit path implies the
//! candidates that held only on that path.

use invar_core::types::Value;

use super::candidate::{Candidate, Observed, Violation};
use super::Invariant;

#[derive(Debug, Clone, PartialEq)]
pub struct Implication {
    pub antecedent: Box<Invariant>,
    pub consequent: Box<Invariant>,
}

impl Implication {
    pub fn new(antecedent: Invariant, consequent: Invariant) -> Self {
        Self {
            antecedent: Box::new(antecedent),
            consequent: Box::new(consequent),
        }
    }
}

impl Candidate for Implication {
    fn class_name(&self) -> &'static str {
        "Implication"
    }

    /// Implications are built from finished pools and are never fed.
    fn observe(&mut self, _values: &[&Value], _count: u32) -> Result<Observed, Violation> {
        Ok(Observed::Unchanged)
    }

    /// Justified exactly when both parts are.
    fn probability(&self) -> Result<f64, Violation> {
        let a = self.antecedent.kind().probability()?;
        let c = self.consequent.kind().probability()?;
        Ok(a.max(c))
    }

    fn format(&self, _names: &[&str]) -> String {
        format!("({}) ==> ({})", self.antecedent.format(), self.consequent.format())
    }

    fn same_formula(&self, other: &Self) -> bool {
        self.antecedent.is_same_formula(&other.antecedent)
            && self.consequent.is_same_formula(&other.consequent)
    }

    fn repr(&self) -> String {
        format!("{} ==> {}", self.antecedent.kind().repr(), self.consequent.kind().repr())
    }
}
