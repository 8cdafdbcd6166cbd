//! Program point and variable selection.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Regex-based selection of the points and variables to analyse.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PointsConfig {
    /// Only points whose name matches are kept.
    pub ppt_regexp: Option<String>,
    /// Points whose name matches are dropped.
    pub ppt_omit_regexp: Option<String>,
    /// Variables whose name matches are dropped.
    pub var_omit_regexp: Option<String>,
}

/// Compiled form of [`PointsConfig`].
#[derive(Debug, Clone, Default)]
pub struct PointSelector {
    keep: Option<Regex>,
    omit: Option<Regex>,
    omit_var: Option<Regex>,
}

impl PointsConfig {
    /// Compile the configured patterns.
    pub fn selector(&self) -> Result<PointSelector, ConfigError> {
        Ok(PointSelector {
            keep: compile("points.ppt_regexp", self.ppt_regexp.as_deref())?,
            omit: compile("points.ppt_omit_regexp", self.ppt_omit_regexp.as_deref())?,
            omit_var: compile("points.var_omit_regexp", self.var_omit_regexp.as_deref())?,
        })
    }
}

impl PointSelector {
    /// Whether the named program point should be analysed.
    pub fn keeps_point(&self, name: &str) -> bool {
        if let Some(ref keep) = self.keep {
            if !keep.is_match(name) {
                return false;
            }
        }
        !self.omit.as_ref().is_some_and(|omit| omit.is_match(name))
    }

    /// Whether the named variable should be analysed.
    pub fn keeps_var(&self, name: &str) -> bool {
        !self.omit_var.as_ref().is_some_and(|omit| omit.is_match(name))
    }
}

fn compile(field: &str, pattern: Option<&str>) -> Result<Option<Regex>, ConfigError> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}
