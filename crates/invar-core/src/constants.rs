//! Shared constants for the invar engine.

/// Maximum number of distinct values a one-of candidate may hold.
pub const ONE_OF_LIMIT: usize = 5;

// ---- Probability sentinels ----

/// Probability of a candidate whose pattern cannot be coincidental.
pub const PROBABILITY_JUSTIFIED: f64 = 0.0;

/// Probability of a candidate that is never worth reporting.
pub const PROBABILITY_UNJUSTIFIED: f64 = 1.0;

/// Sentinel for "no evidence yet"; outside the `[0, 1]` range on purpose.
pub const PROBABILITY_UNKNOWN: f64 = 2.0;

/// Default justification limit (`--prob_limit 1` percent).
pub const DEFAULT_PROBABILITY_LIMIT: f64 = 0.01;

// ---- Program point tags ----

/// Separator between a function name and its point tag.
pub const PPT_TAG_SEPARATOR: &str = ":::";

pub const ENTER_TAG: &str = "ENTER";
pub const EXIT_TAG: &str = "EXIT";
pub const OBJECT_TAG: &str = "OBJECT";
pub const CLASS_TAG: &str = "CLASS";

// ---- Filters ----

pub const FILTER_OBVIOUS: &str = "obvious";
pub const FILTER_ONLY_CONSTANT: &str = "only_constant";
pub const FILTER_SUPPRESSED: &str = "suppressed";
pub const FILTER_CONTROLLED: &str = "controlled";
pub const FILTER_REDUNDANT: &str = "redundant";

/// Default filter chain order.
pub const DEFAULT_FILTER_ORDER: &[&str] = &[
    FILTER_OBVIOUS,
    FILTER_ONLY_CONSTANT,
    FILTER_SUPPRESSED,
    FILTER_CONTROLLED,
    FILTER_REDUNDANT,
];

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "INVAR_LOG";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "invar.toml";
