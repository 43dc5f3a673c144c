//! Progress notification port
//!
//! Defines the interface for reporting progress during a Braintrust round.

use braintrust_domain::{Candidate, QuorumEvaluation};

/// Callback for progress updates during a round
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait RoundProgressNotifier: Send + Sync {
    /// Called once the scouts have been launched
    fn on_dispatch_start(&self, total_scouts: usize);

    /// Called as each scout resolves, in completion order
    fn on_candidate_resolved(&self, candidate: &Candidate);

    /// Called after the quorum checks
    fn on_quorum_evaluated(&self, evaluation: &QuorumEvaluation);

    /// Called before the judge is invoked
    fn on_judge_start(&self, _model: &str) {}

    /// Called when the judge failed and the deterministic winner is used instead
    fn on_judge_fallback(&self, _reason: &str) {}

    /// Called when the round has its final text
    fn on_round_complete(&self, _unavailable: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RoundProgressNotifier for NoProgress {
    fn on_dispatch_start(&self, _total_scouts: usize) {}
    fn on_candidate_resolved(&self, _candidate: &Candidate) {}
    fn on_quorum_evaluated(&self, _evaluation: &QuorumEvaluation) {}
}
