//! Run configuration assembled from files, environment and flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{FilterConfig, InferenceConfig, OutputConfig, PointsConfig};
use crate::constants::{DEFAULT_FILTER_ORDER, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;
use crate::types::collections::FxHashSet;

/// Everything an inference run reads from its environment.
///
/// Later layers win: compiled defaults, then `~/.invar/config.toml`, then
/// `invar.toml` beside the traces, then `INVAR_*` variables, then flags.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InvarConfig {
    pub inference: InferenceConfig,
    pub points: PointsConfig,
    pub filters: FilterConfig,
    pub output: OutputConfig,
}

/// Command-line switches that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--prob_limit`, as a percentage.
    pub prob_limit_percent: Option<f64>,
    pub ppt_regexp: Option<String>,
    pub ppt_omit_regexp: Option<String>,
    pub var_omit_regexp: Option<String>,
    pub suppress_cont: bool,
    pub suppress_redundant: bool,
    pub no_text_output: bool,
    pub output_num_samples: bool,
}

impl InvarConfig {
    /// Resolve all layers for a run whose project directory is `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. A broken user file is fatal, an
        // unreadable one is skipped.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(path = %user_config_path.display(), error = %e, "skipping user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load a configuration from an explicitly named file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        Self::merge_toml_file(&mut config, path)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Parse and validate an inline TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Reject limits outside `[0, 1]`, unknown or repeated filters and bad
    /// selector patterns.
    pub fn validate(config: &InvarConfig) -> Result<(), ConfigError> {
        if let Some(limit) = config.inference.probability_limit {
            if !(0.0..=1.0).contains(&limit) {
                return Err(ConfigError::ValidationFailed {
                    field: "inference.probability_limit".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for id in &config.filters.order {
            if !DEFAULT_FILTER_ORDER.contains(&id.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "filters.order".to_string(),
                    message: format!("unknown filter '{id}'"),
                });
            }
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::DuplicateRegistration {
                    kind: "filter".to_string(),
                    name: id.clone(),
                });
            }
        }

        config.points.selector()?;
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".invar").join("config.toml"))
    }

    /// Overlay one file onto `config`. Keys this version does not know are ignored.
    fn merge_toml_file(config: &mut InvarConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: InvarConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut InvarConfig, other: &InvarConfig) {
        // [inference]
        if other.inference.probability_limit.is_some() {
            base.inference.probability_limit = other.inference.probability_limit;
        }
        if other.inference.ignore_comparability.is_some() {
            base.inference.ignore_comparability = other.inference.ignore_comparability;
        }
        if other.inference.disable_ternary.is_some() {
            base.inference.disable_ternary = other.inference.disable_ternary;
        }
        if other.inference.derive_variables.is_some() {
            base.inference.derive_variables = other.inference.derive_variables;
        }
        if other.inference.parallel.is_some() {
            base.inference.parallel = other.inference.parallel;
        }

        // [points]
        if other.points.ppt_regexp.is_some() {
            base.points.ppt_regexp = other.points.ppt_regexp.clone();
        }
        if other.points.ppt_omit_regexp.is_some() {
            base.points.ppt_omit_regexp = other.points.ppt_omit_regexp.clone();
        }
        if other.points.var_omit_regexp.is_some() {
            base.points.var_omit_regexp = other.points.var_omit_regexp.clone();
        }

        // [filters]
        if !other.filters.order.is_empty() {
            base.filters.order = other.filters.order.clone();
        }
        if other.filters.suppress_implied_controlled.is_some() {
            base.filters.suppress_implied_controlled = other.filters.suppress_implied_controlled;
        }
        if other.filters.suppress_redundant.is_some() {
            base.filters.suppress_redundant = other.filters.suppress_redundant;
        }

        // [output]
        if other.output.no_text_output.is_some() {
            base.output.no_text_output = other.output.no_text_output;
        }
        if other.output.output_num_samples.is_some() {
            base.output.output_num_samples = other.output.output_num_samples;
        }
    }

    /// `INVAR_<KEY>` overrides. Values that fail to parse are left alone.
    fn apply_env_overrides(config: &mut InvarConfig) {
        if let Ok(val) = std::env::var("INVAR_PROBABILITY_LIMIT") {
            if let Ok(v) = val.parse::<f64>() {
                config.inference.probability_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("INVAR_IGNORE_COMPARABILITY") {
            if let Ok(v) = val.parse::<bool>() {
                config.inference.ignore_comparability = Some(v);
            }
        }
        if let Ok(val) = std::env::var("INVAR_DISABLE_TERNARY") {
            if let Ok(v) = val.parse::<bool>() {
                config.inference.disable_ternary = Some(v);
            }
        }
        if let Ok(val) = std::env::var("INVAR_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.inference.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("INVAR_PPT_REGEXP") {
            config.points.ppt_regexp = Some(val);
        }
        if let Ok(val) = std::env::var("INVAR_PPT_OMIT_REGEXP") {
            config.points.ppt_omit_regexp = Some(val);
        }
        if let Ok(val) = std::env::var("INVAR_VAR_OMIT_REGEXP") {
            config.points.var_omit_regexp = Some(val);
        }
        if let Ok(val) = std::env::var("INVAR_SUPPRESS_REDUNDANT") {
            if let Ok(v) = val.parse::<bool>() {
                config.filters.suppress_redundant = Some(v);
            }
        }
    }

    /// `--prob_limit` is a percentage; boolean switches only ever turn things on.
    fn apply_cli_overrides(config: &mut InvarConfig, cli: &CliOverrides) {
        if let Some(percent) = cli.prob_limit_percent {
            config.inference.probability_limit = Some(0.01 * percent);
        }
        if let Some(ref v) = cli.ppt_regexp {
            config.points.ppt_regexp = Some(v.clone());
        }
        if let Some(ref v) = cli.ppt_omit_regexp {
            config.points.ppt_omit_regexp = Some(v.clone());
        }
        if let Some(ref v) = cli.var_omit_regexp {
            config.points.var_omit_regexp = Some(v.clone());
        }
        if cli.suppress_cont {
            config.filters.suppress_implied_controlled = Some(true);
        }
        if cli.suppress_redundant {
            config.filters.suppress_redundant = Some(true);
        }
        if cli.no_text_output {
            config.output.no_text_output = Some(true);
        }
        if cli.output_num_samples {
            config.output.output_num_samples = Some(true);
        }
    }

    /// The resolved configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// `$HOME`, or `%USERPROFILE%` on Windows.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
