//! Run reports and the sinks they are written to.

use std::io::Write;

use serde::Serialize;

use invar_core::errors::PipelineError;
use invar_core::types::InvariantId;

use crate::invariants::{DiscardCode, DiscardInfo};

/// Separator line printed before each point.
const POINT_SEPARATOR: &str =
    "===========================================================================";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedInvariant {
    pub id: InvariantId,
    pub class_name: String,
    pub text: String,
}

/// Everything decided about one program point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointReport {
    pub point: String,
    pub num_samples: u64,
    /// Survivors, in creation order.
    pub invariants: Vec<ReportedInvariant>,
    pub discarded: Vec<DiscardInfo>,
}

impl PointReport {
    pub fn texts(&self) -> Vec<&str> {
        self.invariants.iter().map(|i| i.text.as_str()).collect()
    }

    pub fn discards_with(&self, code: DiscardCode) -> impl Iterator<Item = &DiscardInfo> {
        self.discarded.iter().filter(move |d| d.code() == code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub points: usize,
    pub points_with_samples: usize,
    pub samples: u64,
    pub candidates_created: usize,
    pub falsified: usize,
    pub implications: usize,
    pub unjustified: usize,
    pub filtered: usize,
    pub reported: usize,
    pub malformed_observations: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InferenceReport {
    /// One entry per point, in processing order.
    pub points: Vec<PointReport>,
    pub stats: RunStats,
}

impl InferenceReport {
    pub fn point(&self, name: &str) -> Option<&PointReport> {
        self.points.iter().find(|p| p.point == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Receives point reports in processing order.
pub trait EmissionSink {
    fn emit(&mut self, report: &PointReport) -> Result<(), PipelineError>;

    fn finish(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }
}

/// Keeps every emitted report.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub reports: Vec<PointReport>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmissionSink for CollectingSink {
    fn emit(&mut self, report: &PointReport) -> Result<(), PipelineError> {
        self.reports.push(report.clone());
        Ok(())
    }
}

/// Plain text: a separator, the point name, then one line per invariant.
pub struct TextSink<W: Write> {
    writer: W,
    output_num_samples: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W, output_num_samples: bool) -> Self {
        Self {
            writer,
            output_num_samples,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_report(&mut self, report: &PointReport) -> std::io::Result<()> {
        writeln!(self.writer, "{POINT_SEPARATOR}")?;
        if self.output_num_samples {
            writeln!(self.writer, "{}  {} samples", report.point, report.num_samples)?;
        } else {
            writeln!(self.writer, "{}", report.point)?;
        }
        for invariant in &report.invariants {
            writeln!(self.writer, "{}", invariant.text)?;
        }
        Ok(())
    }
}

impl<W: Write> EmissionSink for TextSink<W> {
    fn emit(&mut self, report: &PointReport) -> Result<(), PipelineError> {
        self.write_report(report)
            .map_err(|e| PipelineError::Sink(e.to_string()))
    }

    fn finish(&mut self) -> Result<(), PipelineError> {
        self.writer
            .flush()
            .map_err(|e| PipelineError::Sink(e.to_string()))
    }
}
