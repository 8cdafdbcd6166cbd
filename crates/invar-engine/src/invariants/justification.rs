//! Justification: turning a candidate's coincidence probability into a
//! reporting decision.

use serde::Serialize;
use statrs::distribution::{Binomial, Discrete};

use invar_core::config::InferenceConfig;
use invar_core::constants::{PROBABILITY_UNJUSTIFIED, PROBABILITY_UNKNOWN};

/// Whether a candidate has enough evidence to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    Justified,
    Unjustified,
    /// No evidence yet.
    Unknown,
}

impl Justification {
    pub fn is_justified(self) -> bool {
        self == Self::Justified
    }
}

/// Compares probabilities against the configured limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JustificationScorer {
    limit: f64,
}

impl JustificationScorer {
    pub fn new(limit: f64) -> Self {
        Self { limit }
    }

    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(config.effective_probability_limit())
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn classify(&self, probability: f64) -> Justification {
        if probability >= PROBABILITY_UNKNOWN {
            Justification::Unknown
        } else if probability < PROBABILITY_UNJUSTIFIED && probability <= self.limit {
            Justification::Justified
        } else {
            Justification::Unjustified
        }
    }
}

impl Default for JustificationScorer {
    fn default() -> Self {
        Self::new(invar_core::constants::DEFAULT_PROBABILITY_LIMIT)
    }
}

/// Chance that `samples` draws, uniform over `range` values, all missed one
/// particular value. Used for bounds: a bound that would have been crossed
/// by chance is not worth reporting.
pub fn miss_probability(samples: u64, range: f64) -> f64 {
    if samples == 0 {
        return PROBABILITY_UNKNOWN;
    }
    if range <= 1.0 || !range.is_finite() {
        return PROBABILITY_UNJUSTIFIED;
    }
    Binomial::new(1.0 / range, samples)
        .map(|b| b.pmf(0))
        .unwrap_or(PROBABILITY_UNJUSTIFIED)
}

/// Chance that `distinct` independent points happen to fit a formula with
/// `free` parameters, each extra point halving it.
pub fn fit_probability(distinct: usize, free: usize) -> f64 {
    if distinct <= free {
        return PROBABILITY_UNKNOWN;
    }
    0.5_f64.powi((distinct - free) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invar_core::constants::PROBABILITY_JUSTIFIED;

    #[test]
    fn test_classify_sentinels() {
        let scorer = JustificationScorer::new(0.01);
        assert_eq!(scorer.classify(PROBABILITY_JUSTIFIED), Justification::Justified);
        assert_eq!(scorer.classify(PROBABILITY_UNJUSTIFIED), Justification::Unjustified);
        assert_eq!(scorer.classify(PROBABILITY_UNKNOWN), Justification::Unknown);
        assert_eq!(scorer.classify(0.01), Justification::Justified);
        assert_eq!(scorer.classify(0.0101), Justification::Unjustified);
    }

    #[test]
    fn test_unjustified_sentinel_never_justifies() {
        assert_eq!(
            JustificationScorer::new(1.0).classify(PROBABILITY_UNJUSTIFIED),
            Justification::Unjustified
        );
    }

    #[test]
    fn test_miss_probability_shrinks_with_samples() {
        let few = miss_probability(4, 4.0);
        let many = miss_probability(40, 4.0);
        assert!((few - 0.75_f64.powi(4)).abs() < 1e-9);
        assert!(many < few);
        assert_eq!(miss_probability(0, 4.0), PROBABILITY_UNKNOWN);
        assert_eq!(miss_probability(10, 1.0), PROBABILITY_UNJUSTIFIED);
    }

    #[test]
    fn test_fit_probability() {
        assert_eq!(fit_probability(2, 2), PROBABILITY_UNKNOWN);
        assert_eq!(fit_probability(3, 2), 0.5);
        assert!(fit_probability(9, 2) < 0.01);
    }
}
