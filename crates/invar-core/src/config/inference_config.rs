//! Candidate instantiation and justification settings.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PROBABILITY_LIMIT;

/// Configuration for the inference engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InferenceConfig {
    /// Largest probability still considered justified. Default: 0.01.
    pub probability_limit: Option<f64>,
    /// Relate variables regardless of comparability tags. Default: false.
    pub ignore_comparability: Option<bool>,
    /// Skip three-variable candidates. Default: false.
    pub disable_ternary: Option<bool>,
    /// Add sequence length / subscript derived variables. Default: true.
    pub derive_variables: Option<bool>,
    /// Process program points on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl InferenceConfig {
    pub fn effective_probability_limit(&self) -> f64 {
        self.probability_limit.unwrap_or(DEFAULT_PROBABILITY_LIMIT)
    }

    pub fn effective_ignore_comparability(&self) -> bool {
        self.ignore_comparability.unwrap_or(false)
    }

    pub fn effective_disable_ternary(&self) -> bool {
        self.disable_ternary.unwrap_or(false)
    }

    pub fn effective_derive_variables(&self) -> bool {
        self.derive_variables.unwrap_or(true)
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
