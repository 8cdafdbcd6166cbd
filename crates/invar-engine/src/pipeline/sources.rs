//! Input seams: where declarations and trace records come from.
//!
//! Any iterator of the right item type is a source, so in-memory vectors,
//! parsers and generators plug in the same way.

use serde::{Deserialize, Serialize};

use invar_core::types::{PointDecl, ValueObservation};

/// One sample tagged with the point it was recorded at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub point: String,
    #[serde(flatten)]
    pub observation: ValueObservation,
}

impl TraceRecord {
    pub fn new(point: impl Into<String>, observation: ValueObservation) -> Self {
        Self {
            point: point.into(),
            observation,
        }
    }
}

/// Ordered stream of point declarations.
pub trait DeclarationSource {
    fn next_declaration(&mut self) -> Option<PointDecl>;
}

/// Ordered stream of trace records.
pub trait TraceSource {
    fn next_record(&mut self) -> Option<TraceRecord>;
}

impl<I> DeclarationSource for I
where
    I: Iterator<Item = PointDecl>,
{
    fn next_declaration(&mut self) -> Option<PointDecl> {
        self.next()
    }
}

impl<I> TraceSource for I
where
    I: Iterator<Item = TraceRecord>,
{
    fn next_record(&mut self) -> Option<TraceRecord> {
        self.next()
    }
}

/// Parse newline-delimited JSON trace records, skipping blank lines.
pub fn parse_trace_lines(input: &str) -> Result<Vec<TraceRecord>, serde_json::Error> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use invar_core::types::{ModBit, Value};

    #[test]
    fn test_parse_trace_lines() {
        let input = r#"
{"point":"F.f():::ENTER","values":[[{"type":"int","value":3},"modified"]],"count":2}

{"point":"F.f():::EXIT1","values":[[{"type":"null"},"missing"]]}
"#;
        let records = parse_trace_lines(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].observation.count, 2);
        assert_eq!(records[0].observation.values[0], (Value::Int(3), ModBit::Modified));
        assert_eq!(records[1].observation.count, 1);
        assert!(records[1].observation.values[0].1.is_missing());
    }

    #[test]
    fn test_iterators_are_sources() {
        let mut source = vec![TraceRecord::new("P:::ENTER", ValueObservation::modified([]))].into_iter();
        assert!(source.next_record().is_some());
        assert!(source.next_record().is_none());
    }
}
