//! Filter chain configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FILTER_ORDER;

/// Configuration for the reporting filter chain.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// Filter ids in the order they are applied.
    #[serde(default)]
    pub order: Vec<String>,
    /// Hide candidates already reported at a controlling point. Default: false.
    pub suppress_implied_controlled: Option<bool>,
    /// Hide candidates marked by the redundancy hook. Default: false.
    pub suppress_redundant: Option<bool>,
}

impl FilterConfig {
    /// Returns the configured order, or the default order when unset.
    pub fn effective_order(&self) -> Vec<String> {
        if self.order.is_empty() {
            DEFAULT_FILTER_ORDER.iter().map(|s| s.to_string()).collect()
        } else {
            self.order.clone()
        }
    }

    pub fn effective_suppress_implied_controlled(&self) -> bool {
        self.suppress_implied_controlled.unwrap_or(false)
    }

    pub fn effective_suppress_redundant(&self) -> bool {
        self.suppress_redundant.unwrap_or(false)
    }
}
