//! Run Round use case
//!
//! Orchestrates one full Braintrust round:
//! dispatch → quorum evaluation → synthesis (or unavailability notice).

use super::dispatch::{ScoutDispatcher, elapsed_ms};
use super::synthesize::Synthesizer;
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::ports::round_logger::{NoRoundLogger, RoundEvent, RoundLogger};
use crate::ports::worker::{JudgeExecutor, WorkerExecutor};
use braintrust_domain::{
    BraintrustSettings, Candidate, DomainError, NO_USABLE_CANDIDATE_REASON, QuorumEvaluation,
    RefusalPolicy, RoundTelemetry, RuntimeBridgeResult, evaluate_quorum,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

/// Errors that can occur before a round starts
#[derive(Error, Debug)]
pub enum RunRoundError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),
}

/// Input for the RunRound use case
#[derive(Debug, Clone)]
pub struct RunRoundInput {
    /// The user prompt every scout answers
    pub prompt: String,
    /// Validated settings for this round
    pub settings: BraintrustSettings,
}

impl RunRoundInput {
    pub fn new(prompt: impl Into<String>, settings: BraintrustSettings) -> Self {
        Self {
            prompt: prompt.into(),
            settings,
        }
    }
}

/// Result of a round plus the evaluation that decided it
#[derive(Debug, Clone)]
pub struct RunRoundOutput {
    pub result: RuntimeBridgeResult,
    /// Effective evaluation; fails with "no usable candidate output" when
    /// quorum passed but nothing was usable
    pub evaluation: QuorumEvaluation,
}

/// Use case for running a Braintrust round
pub struct RunRoundUseCase {
    dispatcher: ScoutDispatcher,
    synthesizer: Synthesizer,
    logger: Arc<dyn RoundLogger>,
}

impl RunRoundUseCase {
    pub fn new(worker: Arc<dyn WorkerExecutor>) -> Self {
        Self {
            dispatcher: ScoutDispatcher::new(worker),
            synthesizer: Synthesizer::deterministic(),
            logger: Arc::new(NoRoundLogger),
        }
    }

    /// Merge answers through `judge` instead of the deterministic winner.
    pub fn with_judge(mut self, judge: Arc<dyn JudgeExecutor>) -> Self {
        self.synthesizer = Synthesizer::with_judge(judge);
        self
    }

    pub fn with_refusal_policy(mut self, policy: Arc<dyn RefusalPolicy>) -> Self {
        self.dispatcher = self.dispatcher.with_refusal_policy(policy);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn RoundLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunRoundInput) -> Result<RunRoundOutput, RunRoundError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunRoundInput,
        progress: &dyn RoundProgressNotifier,
    ) -> Result<RunRoundOutput, RunRoundError> {
        let prompt = input.prompt.trim();
        if prompt.is_empty() {
            return Err(DomainError::EmptyPrompt.into());
        }
        let settings = &input.settings;
        let started = Instant::now();

        info!(
            "Starting Braintrust round: teamSize={} strategy={} quorum={}",
            settings.team_size,
            settings.strategy,
            settings.quorum()
        );
        self.logger.log(RoundEvent::new(
            "round_started",
            json!({
                "promptChars": prompt.chars().count(),
                "teamSize": settings.team_size,
                "strategy": settings.strategy.as_str(),
                "timeoutSeconds": settings.timeout_seconds,
                "judge": self.synthesizer.has_judge(),
            }),
        ));

        // Phase 1: Dispatch
        let candidates = self.dispatcher.dispatch(prompt, settings, progress).await;
        for candidate in &candidates {
            self.log_candidate(candidate);
        }

        // Phase 2: Quorum
        let evaluation = evaluate_quorum(&candidates, &settings.quorum());
        info!("Quorum: {} (meets={})", evaluation.summary(), evaluation.meets_quorum);
        progress.on_quorum_evaluated(&evaluation);
        self.logger
            .log(RoundEvent::new("quorum_evaluated", json!(evaluation)));

        // Phase 3: Synthesis
        let (result, evaluation) = if evaluation.meets_quorum {
            let synthesis = self
                .synthesizer
                .synthesize(prompt, &candidates, settings, progress, self.logger.as_ref())
                .await;
            match synthesis.final_text.clone() {
                Some(final_text) => (
                    RuntimeBridgeResult::answered(final_text, candidates, synthesis),
                    evaluation,
                ),
                None => {
                    warn!("Quorum met but no candidate output was usable");
                    let evaluation = QuorumEvaluation {
                        meets_quorum: false,
                        reason: Some(NO_USABLE_CANDIDATE_REASON.to_string()),
                        ..evaluation
                    };
                    (
                        RuntimeBridgeResult::unavailable(&evaluation, candidates),
                        evaluation,
                    )
                }
            }
        } else {
            warn!(
                "Quorum not met: {}",
                evaluation.reason.as_deref().unwrap_or_default()
            );
            (
                RuntimeBridgeResult::unavailable(&evaluation, candidates),
                evaluation,
            )
        };

        let telemetry = RoundTelemetry::new(
            elapsed_ms(started),
            &result.candidates,
            result.synthesis.as_ref(),
        );
        let result = result.with_telemetry(telemetry);

        progress.on_round_complete(result.unavailable);
        self.logger.log(RoundEvent::new(
            "round_completed",
            json!({
                "unavailable": result.unavailable,
                "reason": result.reason,
                "winnerId": result.winner_id(),
                "judgeModel": result.judge_model(),
                "judgeFallback": result.synthesis.as_ref().and_then(|s| s.judge_fallback.as_deref()),
                "totalLatencyMs": result.telemetry.as_ref().map(|t| t.total_latency_ms),
            }),
        ));

        Ok(RunRoundOutput { result, evaluation })
    }

    fn log_candidate(&self, candidate: &Candidate) {
        self.logger.log(RoundEvent::new(
            "candidate_resolved",
            json!({
                "id": candidate.id,
                "model": candidate.model,
                "role": candidate.role,
                "status": candidate.status,
                "latencyMs": candidate.latency_ms,
                "error": candidate.error,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Behavior, ScriptedJudge, ScriptedWorker};
    use braintrust_domain::{CandidateStatus, ScoutRole, WorkerResponse};
    use std::sync::Mutex;

    fn settings() -> BraintrustSettings {
        BraintrustSettings {
            enabled: true,
            team_size: 3,
            min_participating_agents: 2,
            min_answering_agents: 2,
            ..BraintrustSettings::default()
        }
    }

    fn reply(text: &str) -> Behavior {
        Behavior::Reply(WorkerResponse::text(text).with_refusal(false))
    }

    async fn run(worker: ScriptedWorker) -> RunRoundOutput {
        RunRoundUseCase::new(Arc::new(worker))
            .execute(RunRoundInput::new("hello", settings()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_deterministic_answer_when_quorum_passes() {
        let output = run(ScriptedWorker::answering_all("short")
            .on(ScoutRole::Critic, reply("a longer candidate answer")))
        .await;

        assert!(!output.result.unavailable);
        assert_eq!(output.result.final_text, "short");
        assert_eq!(output.result.winner_id(), Some("agent-1"));
        assert!(output.evaluation.meets_quorum);
    }

    #[tokio::test]
    async fn test_unavailable_on_timeouts_and_errors() {
        let output = run(ScriptedWorker::new()
            .on(ScoutRole::Solver, reply("ok"))
            .on(ScoutRole::Critic, Behavior::Fail("timeout after 90s".to_string()))
            .on(ScoutRole::Researcher, Behavior::Fail("provider failed".to_string())))
        .await;

        assert!(output.result.unavailable);
        assert!(output.result.final_text.to_lowercase().contains("temporarily unavailable"));
        assert_eq!(
            output.result.reason.as_deref(),
            Some("only 1/3 agents participated")
        );
        assert_eq!(output.result.synthesis, None);
    }

    #[tokio::test]
    async fn test_refusals_participate_without_answering() {
        let refusal = Behavior::Reply(WorkerResponse::text("cannot comply").with_refusal(true));
        let output = run(ScriptedWorker::new()
            .on(ScoutRole::Solver, reply("ok"))
            .on(ScoutRole::Critic, refusal.clone())
            .on(ScoutRole::Researcher, refusal))
        .await;

        assert!(output.result.unavailable);
        assert!(output.result.reason.unwrap().contains("usable answers"));
        assert_eq!(output.evaluation.refused, 2);
    }

    #[tokio::test]
    async fn test_refusal_text_without_flag() {
        let output = run(ScriptedWorker::answering_all("I'm sorry, I cannot help with that.")
            .on(ScoutRole::Solver, Behavior::Reply(WorkerResponse::text("ok"))))
        .await;

        let refusals = output
            .result
            .candidates
            .iter()
            .filter(|c| c.status == CandidateStatus::Refusal)
            .count();
        assert_eq!(refusals, 2);
        assert!(output.result.unavailable);
    }

    #[tokio::test]
    async fn test_judge_failure_still_answers() {
        let judge = Arc::new(ScriptedJudge::failing("judge down"));
        let output = RunRoundUseCase::new(Arc::new(
            ScriptedWorker::answering_all("the longer answer").on(ScoutRole::Critic, reply("brief")),
        ))
        .with_judge(judge.clone())
        .execute(RunRoundInput::new("hello", settings()))
        .await
        .unwrap();

        assert_eq!(judge.calls(), 1);
        assert!(!output.result.unavailable);
        assert_eq!(output.result.final_text, "brief");
        assert_eq!(output.result.winner_id(), Some("agent-2"));
        let telemetry = output.result.telemetry.unwrap();
        assert_eq!(telemetry.judge_model, None);
    }

    #[tokio::test]
    async fn test_judge_answer_recorded_in_telemetry() {
        let output = RunRoundUseCase::new(Arc::new(ScriptedWorker::answering_all("draft")))
            .with_judge(Arc::new(ScriptedJudge::answering("merged")))
            .execute(RunRoundInput::new("hello", settings()))
            .await
            .unwrap();

        assert_eq!(output.result.final_text, "merged");
        let telemetry = output.result.telemetry.unwrap();
        assert_eq!(telemetry.judge_model.as_deref(), Some("gemini-3.1-pro-preview"));
        assert_eq!(telemetry.candidates.len(), 3);
    }

    #[tokio::test]
    async fn test_no_usable_output_is_unavailable() {
        let settings = BraintrustSettings {
            min_participating_agents: 1,
            min_answering_agents: 1,
            ..settings()
        };
        let output = RunRoundUseCase::new(Arc::new(ScriptedWorker::answering_all("   ")))
            .execute(RunRoundInput::new("hello", settings))
            .await
            .unwrap();

        assert!(output.result.unavailable);
        assert_eq!(
            output.result.final_text,
            "Braintrust temporarily unavailable (no usable candidate output)."
        );
        assert!(!output.evaluation.meets_quorum);
        assert_eq!(output.evaluation.answering, 3);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected() {
        let use_case = RunRoundUseCase::new(Arc::new(ScriptedWorker::answering_all("x")));
        let err = use_case
            .execute(RunRoundInput::new("  ", settings()))
            .await
            .unwrap_err();
        assert!(matches!(err, RunRoundError::InvalidInput(DomainError::EmptyPrompt)));
    }

    #[tokio::test]
    async fn test_round_events_are_logged_in_order() {
        struct Events(Mutex<Vec<&'static str>>);
        impl RoundLogger for Events {
            fn log(&self, event: RoundEvent) {
                self.0.lock().unwrap().push(event.event_type);
            }
        }

        let events = Arc::new(Events(Mutex::new(Vec::new())));
        RunRoundUseCase::new(Arc::new(ScriptedWorker::answering_all("ok")))
            .with_logger(events.clone())
            .execute(RunRoundInput::new("hello", settings()))
            .await
            .unwrap();

        assert_eq!(
            *events.0.lock().unwrap(),
            [
                "round_started",
                "candidate_resolved",
                "candidate_resolved",
                "candidate_resolved",
                "quorum_evaluated",
                "round_completed",
            ]
        );
    }
}
