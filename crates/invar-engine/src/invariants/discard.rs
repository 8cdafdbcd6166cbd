//! Discard records: why a candidate was not reported.

use std::fmt;

use serde::Serialize;

use invar_core::types::InvariantId;

/// Reason category for a discarded candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardCode {
    /// The sentinel's code; renders empty.
    #[serde(rename = "")]
    NotDiscarded,
    /// Falsified by an observed tuple.
    BadSample,
    /// Alive but its probability is above the limit.
    BadConfidence,
    Obvious,
    OnlyConstantVars,
    /// Suppressed by a simpler candidate that entails it.
    Implied,
    /// Already stated at a controlling point.
    ControlCheck,
    Redundant,
}

impl DiscardCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotDiscarded => "",
            Self::BadSample => "bad_sample",
            Self::BadConfidence => "bad_confidence",
            Self::Obvious => "obvious",
            Self::OnlyConstantVars => "only_constant_vars",
            Self::Implied => "implied",
            Self::ControlCheck => "control_check",
            Self::Redundant => "redundant",
        }
    }
}

impl fmt::Display for DiscardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one candidate was discarded. The default value means "not discarded".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscardInfo {
    class_name: String,
    discard_format: String,
    code: DiscardCode,
    reason: String,
    invariant: Option<InvariantId>,
}

impl DiscardInfo {
    pub fn new(
        class_name: impl Into<String>,
        discard_format: impl Into<String>,
        code: DiscardCode,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            discard_format: discard_format.into(),
            code,
            reason: reason.into(),
            invariant: None,
        }
    }

    pub fn for_invariant(mut self, id: InvariantId) -> Self {
        self.invariant = Some(id);
        self
    }

    pub fn should_discard(&self) -> bool {
        self.code != DiscardCode::NotDiscarded
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The discarded candidate's formatted text.
    pub fn discard_format(&self) -> &str {
        &self.discard_format
    }

    pub fn code(&self) -> DiscardCode {
        self.code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn invariant(&self) -> Option<InvariantId> {
        self.invariant
    }

    /// Three-line rendering: format, code, reason. Empty for the sentinel.
    pub fn format(&self) -> String {
        if !self.should_discard() {
            return String::new();
        }
        format!("{}\n{}\n{}", self.discard_format, self.code, self.reason)
    }
}

impl Default for DiscardInfo {
    fn default() -> Self {
        Self::new("", "", DiscardCode::NotDiscarded, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_discarded() {
        let info = DiscardInfo::default();
        assert!(!info.should_discard());
        assert_eq!(info.code(), DiscardCode::NotDiscarded);
        assert_eq!(info.code().to_string(), "");
        assert_eq!(info.discard_format(), "");
        assert_eq!(info.format(), "");
        assert_eq!(serde_json::to_value(info.code()).unwrap(), serde_json::json!(""));
    }

    #[test]
    fn test_format_three_lines() {
        let info = DiscardInfo::new("OneOf", "x == 3", DiscardCode::Obvious, "implied by size")
            .for_invariant(InvariantId::new(4));
        assert!(info.should_discard());
        assert_eq!(info.format(), "x == 3\nobvious\nimplied by size");
        assert_eq!(info.invariant(), Some(InvariantId::new(4)));
    }
}
