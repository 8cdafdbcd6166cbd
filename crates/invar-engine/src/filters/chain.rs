//! The filter trait and the chain that applies filters in order.

use tracing::debug;

use invar_core::config::FilterConfig;
use invar_core::constants::{
    DEFAULT_FILTER_ORDER, FILTER_CONTROLLED, FILTER_OBVIOUS, FILTER_ONLY_CONSTANT, FILTER_REDUNDANT,
    FILTER_SUPPRESSED,
};
use invar_core::errors::ConfigError;
use invar_core::types::{FxHashSet, InvariantId, PptId};

use super::{
    ControlledFilter, ObviousFilter, OnlyConstantVariablesFilter, RedundancyFilter,
    SuppressionFilter,
};
use crate::invariants::{DiscardCode, DiscardInfo, Invariant};
use crate::ppt::{PptRegistry, ProgramPoint};

/// What a filter may look at: the candidate's point and, through the
/// registry, the points that control it.
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
    pub registry: &'a PptRegistry,
    pub point: PptId,
}

impl<'a> FilterContext<'a> {
    pub fn new(registry: &'a PptRegistry, point: PptId) -> Self {
        Self { registry, point }
    }

    pub fn point(&self) -> &'a ProgramPoint {
        &self.registry[self.point]
    }
}

/// One reason to withhold a justified candidate.
pub trait InvariantFilter: Send + Sync {
    /// Identifier used in `filters.order`.
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn discard_code(&self) -> DiscardCode;

    fn should_discard(&self, invariant: &Invariant, ctx: &FilterContext<'_>) -> bool;

    /// Reason text recorded when the filter fires.
    fn explain(&self, _invariant: &Invariant, _ctx: &FilterContext<'_>) -> String {
        self.description().to_string()
    }
}

/// Result of running the chain over one point.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterOutcome {
    pub survivors: Vec<InvariantId>,
    pub discards: Vec<DiscardInfo>,
}

pub struct FilterChain {
    filters: Vec<Box<dyn InvariantFilter>>,
}

impl FilterChain {
    /// The default chain: obvious, only-constant, suppressed.
    pub fn new() -> Self {
        let filters = DEFAULT_FILTER_ORDER
            .iter()
            .filter_map(|id| builtin(id, &FilterConfig::default()))
            .collect();
        Self { filters }
    }

    pub fn with_filters(filters: Vec<Box<dyn InvariantFilter>>) -> Self {
        Self { filters }
    }

    /// Build the chain in the configured order. The controlled and
    /// redundant filters only join when their switches are on. Unknown or
    /// repeated ids are rejected.
    pub fn from_config(config: &FilterConfig) -> Result<Self, ConfigError> {
        let mut seen = FxHashSet::default();
        let mut filters = Vec::new();
        for id in config.effective_order() {
            if !DEFAULT_FILTER_ORDER.contains(&id.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "filters.order".to_string(),
                    message: format!("unknown filter '{id}'"),
                });
            }
            if !seen.insert(id.clone()) {
                return Err(ConfigError::DuplicateRegistration {
                    kind: "filter".to_string(),
                    name: id.clone(),
                });
            }
            filters.extend(builtin(&id, config));
        }
        Ok(Self { filters })
    }

    pub fn filter_ids(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.id()).collect()
    }

    /// The first filter that fires decides the discard.
    pub fn check(&self, invariant: &Invariant, ctx: &FilterContext<'_>) -> Option<DiscardInfo> {
        self.filters
            .iter()
            .find(|f| f.should_discard(invariant, ctx))
            .map(|f| invariant.discard(f.discard_code(), f.explain(invariant, ctx)))
    }

    /// Run every justified candidate of the point through the chain.
    /// Unjustified candidates are recorded as low-confidence discards.
    /// Does not modify the point.
    pub fn apply(&self, ctx: &FilterContext<'_>) -> FilterOutcome {
        let point = ctx.point();
        let mut outcome = FilterOutcome::default();
        for invariant in point.invariants() {
            if !invariant.is_justified() {
                outcome
                    .discards
                    .push(invariant.discard(DiscardCode::BadConfidence, "probability above limit"));
                continue;
            }
            match self.check(invariant, ctx) {
                Some(info) => outcome.discards.push(info),
                None => outcome.survivors.push(invariant.id()),
            }
        }
        debug!(
            point = %point.name(),
            survivors = outcome.survivors.len(),
            discarded = outcome.discards.len(),
            "filtered point"
        );
        outcome
    }
}

/// The built-in filter named `id`, if the config switches it on.
fn builtin(id: &str, config: &FilterConfig) -> Option<Box<dyn InvariantFilter>> {
    match id {
        FILTER_OBVIOUS => Some(Box::new(ObviousFilter)),
        FILTER_ONLY_CONSTANT => Some(Box::new(OnlyConstantVariablesFilter)),
        FILTER_SUPPRESSED => Some(Box::new(SuppressionFilter)),
        FILTER_CONTROLLED if config.effective_suppress_implied_controlled() => {
            Some(Box::new(ControlledFilter))
        }
        FILTER_REDUNDANT if config.effective_suppress_redundant() => Some(Box::new(RedundancyFilter)),
        _ => None,
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}
