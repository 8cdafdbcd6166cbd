//! Inference run orchestrator.
//!
//! Stage 1: Declarations → Stage 2: Combined exits → Stage 3: Trace
//! streaming → Stage 4: Per-point inference → Stage 5: Implications →
//! Stage 6: Suppression and redundancy hooks → Stage 7: Filtering →
//! Stage 8: Emission

use rayon::prelude::*;
use tracing::{debug, info};

use invar_core::config::InvarConfig;
use invar_core::errors::{ConfigError, EngineError, PipelineError, PipelineResult};
use invar_core::types::PptId;

use super::emit::{EmissionSink, InferenceReport, PointReport, ReportedInvariant, RunStats};
use super::hooks::{apply_annotations, apply_redundancy, RedundancyOracle, SuppressionPass};
use super::implications::add_implications;
use super::sources::{DeclarationSource, TraceSource};
use crate::filters::{FilterChain, FilterContext};
use crate::invariants::DiscardCode;
use crate::ppt::{combine_exits, PptRegistry, ProcessContext, ProcessStats};

/// One configured inference run.
pub struct InferencePipeline {
    config: InvarConfig,
    chain: FilterChain,
    suppression: Option<Box<dyn SuppressionPass>>,
    oracle: Option<Box<dyn RedundancyOracle>>,
}

impl InferencePipeline {
    /// A pipeline with the filter chain described by `config` and no hooks.
    /// An invalid configuration is rejected here, before any point is read.
    pub fn new(config: InvarConfig) -> Result<Self, ConfigError> {
        InvarConfig::validate(&config)?;
        let chain = FilterChain::from_config(&config.filters)?;
        Ok(Self {
            config,
            chain,
            suppression: None,
            oracle: None,
        })
    }

    pub fn with_filter_chain(mut self, chain: FilterChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_suppression_pass(mut self, pass: impl SuppressionPass + 'static) -> Self {
        self.suppression = Some(Box::new(pass));
        self
    }

    /// Consulted only when `filters.suppress_redundant` is on.
    pub fn with_redundancy_oracle(mut self, oracle: impl RedundancyOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    pub fn config(&self) -> &InvarConfig {
        &self.config
    }

    /// Run every stage and return the report. Malformed observations are
    /// collected in the result; everything else aborts the run.
    pub fn run<D, T, S>(
        &self,
        mut declarations: D,
        mut traces: T,
        sink: &mut S,
    ) -> Result<PipelineResult<InferenceReport>, PipelineError>
    where
        D: DeclarationSource,
        T: TraceSource,
        S: EmissionSink + ?Sized,
    {
        let mut result = PipelineResult::<InferenceReport>::default();
        let mut stats = RunStats::default();

        // Stage 1: Declarations.
        let selector = self.config.points.selector()?;
        let mut registry = PptRegistry::new();
        while let Some(decl) = declarations.next_declaration() {
            registry.declare(&decl, &selector)?;
        }
        registry.link();
        info!(points = registry.len(), "Stage 1: declarations loaded");

        // Stage 2: Combined exits.
        let combined = combine_exits(&mut registry)?;
        info!(combined = combined.len(), "Stage 2: combined exits synthesized");

        // Stage 3: Trace streaming.
        let mut records = 0usize;
        while let Some(record) = traces.next_record() {
            records += 1;
            for error in registry.record(&record.point, record.observation)? {
                stats.malformed_observations += 1;
                result.add_error(error.into());
            }
        }
        info!(
            records,
            malformed = stats.malformed_observations,
            "Stage 3: traces streamed"
        );

        // Stage 4: Per-point inference.
        let ctx = ProcessContext::from_config(&self.config.inference);
        let processed = self.process_points(&mut registry, &ctx)?;
        for point_stats in &processed {
            stats.samples += point_stats.samples;
            stats.candidates_created += point_stats.created;
            stats.falsified += point_stats.falsified;
        }
        info!(
            samples = stats.samples,
            created = stats.candidates_created,
            falsified = stats.falsified,
            "Stage 4: inference complete"
        );

        // Stage 5: Implications.
        stats.implications = add_implications(&mut registry, &ctx.scorer)?;
        info!(implications = stats.implications, "Stage 5: implications added");

        // Stage 6: Hooks.
        let order = registry.sorted_ids();
        self.run_hooks(&mut registry, &order);

        // Stage 7: Filtering.
        let mut report = InferenceReport::default();
        for id in &order {
            let point_report = self.filter_point(&mut registry, *id, &mut stats);
            report.points.push(point_report);
        }
        stats.points = registry.len();
        stats.points_with_samples = registry.iter().filter(|p| p.has_samples()).count();
        info!(
            reported = stats.reported,
            unjustified = stats.unjustified,
            filtered = stats.filtered,
            "Stage 7: filtering complete"
        );

        // Stage 8: Emission.
        if !self.config.output.effective_no_text_output() {
            for point_report in report.points.iter().filter(|p| p.num_samples > 0) {
                sink.emit(point_report)?;
            }
            sink.finish()?;
        }

        report.stats = stats;
        result.data = report;
        Ok(result)
    }

    /// Process every point, on the rayon pool when configured. Each point's
    /// trace buffer is released by its own processing.
    fn process_points(&self, registry: &mut PptRegistry, ctx: &ProcessContext) -> Result<Vec<ProcessStats>, EngineError> {
        if self.config.inference.effective_parallel() {
            registry
                .points_mut()
                .par_iter_mut()
                .map(|point| point.process(ctx))
                .collect()
        } else {
            registry
                .sorted_ids()
                .into_iter()
                .map(|id| registry[id].process(ctx))
                .collect()
        }
    }

    fn run_hooks(&self, registry: &mut PptRegistry, order: &[PptId]) {
        let redundancy = self
            .oracle
            .as_deref()
            .filter(|_| self.config.filters.effective_suppress_redundant());
        if self.suppression.is_none() && redundancy.is_none() {
            return;
        }
        let mut suppressed = 0;
        let mut redundant = 0;
        for id in order {
            if let Some(pass) = self.suppression.as_deref() {
                let annotations = pass.annotate(&registry[*id]);
                suppressed += apply_annotations(&mut registry[*id], &annotations);
            }
            if let Some(oracle) = redundancy {
                let ids = oracle.redundant(&registry[*id]);
                redundant += apply_redundancy(&mut registry[*id], &ids);
            }
        }
        info!(suppressed, redundant, "Stage 6: hooks applied");
    }

    /// Run the chain over one point, record its discards on the point and
    /// build its report.
    fn filter_point(&self, registry: &mut PptRegistry, id: PptId, stats: &mut RunStats) -> PointReport {
        let outcome = self.chain.apply(&FilterContext::new(registry, id));
        let point = &mut registry[id];

        let invariants: Vec<ReportedInvariant> = outcome
            .survivors
            .iter()
            .filter_map(|inv_id| point.invariant(*inv_id))
            .map(|inv| ReportedInvariant {
                id: inv.id(),
                class_name: inv.class_name().to_string(),
                text: inv.format(),
            })
            .collect();
        for discard in &outcome.discards {
            if discard.code() == DiscardCode::BadConfidence {
                stats.unjustified += 1;
            } else {
                stats.filtered += 1;
            }
        }
        stats.reported += invariants.len();
        point.discarded.extend(outcome.discards);

        debug!(point = %point.name(), reported = invariants.len(), "point report ready");
        PointReport {
            point: point.name().to_string(),
            num_samples: point.num_samples(),
            invariants,
            discarded: point.discarded().to_vec(),
        }
    }
}
