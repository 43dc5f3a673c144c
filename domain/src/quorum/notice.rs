//! User-facing unavailability notice.
//!
//! The wording is consumed verbatim by host integrations and must not vary.

use super::evaluation::QuorumEvaluation;

/// Reason used when a quorum-passing round still had no usable answer.
pub const NO_USABLE_CANDIDATE_REASON: &str = "no usable candidate output";

/// Reason used when an evaluation failed without recording one.
pub const INSUFFICIENT_QUORUM_REASON: &str = "insufficient quorum";

/// `Braintrust temporarily unavailable ({reason}).`
pub fn build_unavailable_notice(evaluation: &QuorumEvaluation) -> String {
    unavailable_notice(
        evaluation
            .reason
            .as_deref()
            .unwrap_or(INSUFFICIENT_QUORUM_REASON),
    )
}

/// Notice for an arbitrary reason string.
pub fn unavailable_notice(reason: &str) -> String {
    format!("Braintrust temporarily unavailable ({reason}).")
}
