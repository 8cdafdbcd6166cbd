//! Emission settings.

use serde::{Deserialize, Serialize};

/// Configuration for report emission.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Skip the emission stage entirely. Default: false.
    pub no_text_output: Option<bool>,
    /// Include sample counts in emitted reports. Default: false.
    pub output_num_samples: Option<bool>,
}

impl OutputConfig {
    pub fn effective_no_text_output(&self) -> bool {
        self.no_text_output.unwrap_or(false)
    }

    pub fn effective_output_num_samples(&self) -> bool {
        self.output_num_samples.unwrap_or(false)
    }
}
