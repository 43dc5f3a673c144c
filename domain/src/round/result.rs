//! Round result types - the externally visible outcome of one round.

use crate::quorum::{QuorumEvaluation, build_unavailable_notice};
use crate::scout::{Candidate, CandidateStatus};
use crate::synthesis::SynthesisOutput;
use serde::{Deserialize, Serialize};

/// Per-candidate telemetry row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTelemetry {
    pub id: String,
    pub model: String,
    pub status: CandidateStatus,
    pub latency_ms: u64,
}

impl From<&Candidate> for CandidateTelemetry {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            model: candidate.model.clone(),
            status: candidate.status,
            latency_ms: candidate.latency_ms,
        }
    }
}

/// Aggregate timing for a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTelemetry {
    pub total_latency_ms: u64,
    pub candidates: Vec<CandidateTelemetry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_latency_ms: Option<u64>,
}

impl RoundTelemetry {
    pub fn new(
        total_latency_ms: u64,
        candidates: &[Candidate],
        synthesis: Option<&SynthesisOutput>,
    ) -> Self {
        Self {
            total_latency_ms,
            candidates: candidates.iter().map(CandidateTelemetry::from).collect(),
            judge_model: synthesis.and_then(|s| s.judge_model.clone()),
            judge_latency_ms: synthesis.and_then(|s| s.judge_latency_ms),
        }
    }
}

/// Outcome of one dispatch-evaluate-synthesize round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeBridgeResult {
    /// Final answer, or the unavailability notice
    #[serde(rename = "final")]
    pub final_text: String,
    /// Every scout's candidate, in slot order
    pub candidates: Vec<Candidate>,
    pub unavailable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<SynthesisOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<RoundTelemetry>,
}

impl RuntimeBridgeResult {
    /// Successful round with a synthesized answer.
    pub fn answered(
        final_text: impl Into<String>,
        candidates: Vec<Candidate>,
        synthesis: SynthesisOutput,
    ) -> Self {
        Self {
            final_text: final_text.into(),
            candidates,
            unavailable: false,
            reason: None,
            synthesis: Some(synthesis),
            telemetry: None,
        }
    }

    /// Round that ends in the unavailability notice for `evaluation`.
    pub fn unavailable(evaluation: &QuorumEvaluation, candidates: Vec<Candidate>) -> Self {
        Self {
            final_text: build_unavailable_notice(evaluation),
            candidates,
            unavailable: true,
            reason: evaluation.reason.clone(),
            synthesis: None,
            telemetry: None,
        }
    }

    pub fn with_synthesis(mut self, synthesis: SynthesisOutput) -> Self {
        self.synthesis = Some(synthesis);
        self
    }

    pub fn with_telemetry(mut self, telemetry: RoundTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Winner id when the deterministic path produced the answer.
    pub fn winner_id(&self) -> Option<&str> {
        self.synthesis.as_ref()?.winner_id.as_deref()
    }

    /// Judge model when the judge produced the answer.
    pub fn judge_model(&self) -> Option<&str> {
        self.synthesis.as_ref()?.judge_model.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_uses_notice() {
        let evaluation = QuorumEvaluation::unavailable(2, "only 1/3 agents participated");
        let result = RuntimeBridgeResult::unavailable(&evaluation, vec![]);
        assert!(result.unavailable);
        assert_eq!(
            result.final_text,
            "Braintrust temporarily unavailable (only 1/3 agents participated)."
        );
        assert_eq!(result.reason.as_deref(), Some("only 1/3 agents participated"));
    }

    #[test]
    fn test_telemetry_from_candidates() {
        let candidates = vec![
            Candidate::answered("agent-1", "m1", "a").with_latency(30),
            Candidate::new("agent-2", "m2", CandidateStatus::Timeout).with_latency(90_000),
        ];
        let synthesis = SynthesisOutput::judged("merged", "judge", 400);
        let telemetry = RoundTelemetry::new(90_400, &candidates, Some(&synthesis));

        assert_eq!(telemetry.candidates.len(), 2);
        assert_eq!(telemetry.candidates[1].status, CandidateStatus::Timeout);
        assert_eq!(telemetry.judge_model.as_deref(), Some("judge"));
        assert_eq!(telemetry.judge_latency_ms, Some(400));
    }

    #[test]
    fn test_serialize_shape() {
        let result = RuntimeBridgeResult::answered(
            "short",
            vec![Candidate::answered("agent-1", "m", "short")],
            SynthesisOutput::winner("agent-1", "short"),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["final"], "short");
        assert_eq!(json["unavailable"], false);
        assert_eq!(json["synthesis"]["winnerId"], "agent-1");
        assert!(json.get("reason").is_none());
        assert_eq!(result.winner_id(), Some("agent-1"));
        assert_eq!(result.judge_model(), None);
    }
}
