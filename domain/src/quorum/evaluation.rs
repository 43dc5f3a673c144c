//! Quorum evaluation over a round's candidates
//!
//! Checks run in a fixed priority order and the first failing check sets
//! the reason:
//!
//! 1. participation: candidates that did not time out or error
//! 2. answering: candidates with status `ok`
//!
//! A round short on participants always reports the participation reason,
//! even when answers are also short.

use super::config::QuorumConfig;
use crate::scout::{Candidate, CandidateStatus};
use serde::{Deserialize, Serialize};

/// Read-only summary of a round against its quorum thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuorumEvaluation {
    pub participating: usize,
    pub answering: usize,
    pub refused: usize,
    pub failed: usize,
    pub meets_quorum: bool,
    /// Set iff `meets_quorum` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl QuorumEvaluation {
    /// Failing evaluation with an explicit reason and zero counts beyond
    /// `failed`, used for conditions detected outside the quorum checks.
    pub fn unavailable(failed: usize, reason: impl Into<String>) -> Self {
        Self {
            participating: 0,
            answering: 0,
            refused: 0,
            failed,
            meets_quorum: false,
            reason: Some(reason.into()),
        }
    }

    /// `participating=.. answering=.. refused=.. failed=..`
    pub fn summary(&self) -> String {
        format!(
            "participating={} answering={} refused={} failed={}",
            self.participating, self.answering, self.refused, self.failed
        )
    }
}

/// Evaluate `candidates` against `config`. Pure.
pub fn evaluate_quorum(candidates: &[Candidate], config: &QuorumConfig) -> QuorumEvaluation {
    let total = candidates.len();
    let participating = candidates
        .iter()
        .filter(|c| c.status.is_participating())
        .count();
    let answering = candidates
        .iter()
        .filter(|c| c.status == CandidateStatus::Ok)
        .count();
    let refused = candidates
        .iter()
        .filter(|c| c.status == CandidateStatus::Refusal)
        .count();
    let failed = total - participating;

    let reason = if participating < config.min_participating_agents {
        Some(format!("only {participating}/{total} agents participated"))
    } else if answering < config.min_answering_agents {
        Some(format!(
            "only {answering}/{total} agents produced usable answers"
        ))
    } else {
        None
    };

    QuorumEvaluation {
        participating,
        answering,
        refused,
        failed,
        meets_quorum: reason.is_none(),
        reason,
    }
}
