//! Synthesis output value object

use serde::{Deserialize, Serialize};

/// Result of synthesizing a round's usable candidates
///
/// Exactly one provenance is set when `final_text` is present: `winner_id`
/// for the deterministic path, `judge_model`/`judge_latency_ms` for the
/// judge path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisOutput {
    /// `None` when no usable candidate existed
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_latency_ms: Option<u64>,
    /// Why the judge was bypassed after being attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_fallback: Option<String>,
}

impl SynthesisOutput {
    /// No usable candidate.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Deterministic or short-circuit winner.
    pub fn winner(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            final_text: Some(text.into()),
            winner_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Merged answer produced by the judge.
    pub fn judged(text: impl Into<String>, model: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            final_text: Some(text.into()),
            judge_model: Some(model.into()),
            judge_latency_ms: Some(latency_ms),
            ..Self::default()
        }
    }

    /// Record that the judge failed and this output is the fallback.
    pub fn with_judge_fallback(mut self, reason: impl Into<String>) -> Self {
        self.judge_fallback = Some(reason.into());
        self
    }

    pub fn has_final(&self) -> bool {
        self.final_text.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_final_key() {
        let json = serde_json::to_value(SynthesisOutput::winner("agent-1", "4")).unwrap();
        assert_eq!(json["final"], "4");
        assert_eq!(json["winnerId"], "agent-1");
        assert!(json.get("judgeModel").is_none());
    }

    #[test]
    fn test_judged() {
        let out = SynthesisOutput::judged("merged", "opus", 120);
        assert!(out.has_final());
        assert_eq!(out.winner_id, None);
        assert_eq!(out.judge_latency_ms, Some(120));
        assert!(!SynthesisOutput::empty().has_final());
    }
}
