//! Synthesis use case
//!
//! Reduces a round's usable candidates to one answer. With a judge
//! configured and more than one usable candidate the judge merges them;
//! any judge failure falls back to the deterministic winner.

use super::dispatch::elapsed_ms;
use crate::ports::progress::RoundProgressNotifier;
use crate::ports::round_logger::{RoundEvent, RoundLogger};
use crate::ports::worker::{JudgeExecutor, JudgeRequest, WorkerError};
use braintrust_domain::synthesis::usable_candidates;
use braintrust_domain::{
    BraintrustSettings, Candidate, PromptTemplate, SynthesisOutput, synthesize_deterministic,
};
use serde_json::json;
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Turns candidates into a [`SynthesisOutput`]
pub struct Synthesizer {
    judge: Option<Arc<dyn JudgeExecutor>>,
}

impl Synthesizer {
    pub fn new(judge: Option<Arc<dyn JudgeExecutor>>) -> Self {
        Self { judge }
    }

    /// Synthesizer that never calls a judge
    pub fn deterministic() -> Self {
        Self { judge: None }
    }

    pub fn with_judge(judge: Arc<dyn JudgeExecutor>) -> Self {
        Self { judge: Some(judge) }
    }

    pub fn has_judge(&self) -> bool {
        self.judge.is_some()
    }

    /// Synthesize. Never fails: an output without final text means no
    /// candidate was usable.
    pub async fn synthesize(
        &self,
        prompt: &str,
        candidates: &[Candidate],
        settings: &BraintrustSettings,
        progress: &dyn RoundProgressNotifier,
        logger: &dyn RoundLogger,
    ) -> SynthesisOutput {
        let usable = usable_candidates(candidates);
        if usable.is_empty() {
            debug!("No usable candidates to synthesize");
            return SynthesisOutput::empty();
        }

        let Some(judge) = &self.judge else {
            return synthesize_deterministic(candidates);
        };

        if let [(only, text)] = usable.as_slice() {
            debug!("Single usable candidate {}, skipping judge", only.id);
            return SynthesisOutput::winner(only.id.clone(), *text);
        }

        info!(
            "Judging {} candidates with {}",
            usable.len(),
            settings.synth_model
        );
        progress.on_judge_start(&settings.synth_model);

        match self.call_judge(judge.as_ref(), prompt, candidates, settings).await {
            Ok((text, latency_ms)) => {
                SynthesisOutput::judged(text, settings.synth_model.clone(), latency_ms)
            }
            Err(reason) => {
                warn!("Judge failed, falling back to deterministic synthesis: {}", reason);
                progress.on_judge_fallback(&reason);
                logger.log(RoundEvent::new(
                    "judge_fallback",
                    json!({
                        "model": settings.synth_model,
                        "reason": reason,
                    }),
                ));
                synthesize_deterministic(candidates).with_judge_fallback(reason)
            }
        }
    }

    /// Raced judge call. Returns trimmed text and measured latency, or the
    /// fallback reason.
    async fn call_judge(
        &self,
        judge: &dyn JudgeExecutor,
        prompt: &str,
        candidates: &[Candidate],
        settings: &BraintrustSettings,
    ) -> Result<(String, u64), String> {
        let request = JudgeRequest {
            model: settings.synth_model.clone(),
            system_prompt: PromptTemplate::judge_system().to_string(),
            user_prompt: PromptTemplate::judge_prompt(prompt, candidates),
            timeout_seconds: settings.timeout_seconds,
        };
        let cancel = CancellationToken::new();
        let started = Instant::now();

        let outcome =
            tokio::time::timeout(settings.timeout(), judge.judge(request, cancel.clone())).await;
        let latency_ms = elapsed_ms(started);

        match outcome {
            Err(_) => {
                cancel.cancel();
                Err(WorkerError::Timeout(settings.timeout_seconds).to_string())
            }
            Ok(Err(error)) => Err(error.to_string()),
            Ok(Ok(response)) => {
                let text = response.text.trim();
                if text.is_empty() {
                    Err(WorkerError::EmptyOutput.to_string())
                } else {
                    Ok((text.to_string(), latency_ms))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::ports::round_logger::NoRoundLogger;
    use crate::use_cases::test_support::ScriptedJudge;
    use braintrust_domain::{CandidateStatus, ScoutRole};
    use std::sync::Mutex;
    use std::time::Duration;

    fn two_answers() -> Vec<Candidate> {
        vec![
            Candidate::answered("a", "m1", "this is longer").with_role(ScoutRole::Solver),
            Candidate::answered("b", "m2", "short").with_role(ScoutRole::Critic),
        ]
    }

    async fn run(synth: &Synthesizer, candidates: &[Candidate]) -> SynthesisOutput {
        synth
            .synthesize(
                "prompt",
                candidates,
                &BraintrustSettings::default(),
                &NoProgress,
                &NoRoundLogger,
            )
            .await
    }

    #[tokio::test]
    async fn test_deterministic_without_judge() {
        let out = run(&Synthesizer::deterministic(), &two_answers()).await;
        assert_eq!(out.final_text.as_deref(), Some("short"));
        assert_eq!(out.winner_id.as_deref(), Some("b"));
        assert_eq!(out.judge_model, None);
    }

    #[tokio::test]
    async fn test_no_usable_candidates() {
        let judge = Arc::new(ScriptedJudge::answering("merged"));
        let candidates = vec![
            Candidate::new("a", "m", CandidateStatus::Refusal),
            Candidate::answered("b", "m", "   "),
        ];
        let out = run(&Synthesizer::with_judge(judge.clone()), &candidates).await;
        assert!(!out.has_final());
        assert_eq!(judge.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_usable_skips_judge() {
        let judge = Arc::new(ScriptedJudge::answering("merged"));
        let candidates = vec![
            Candidate::answered("agent-1", "m1", "  only answer  "),
            Candidate::new("agent-2", "m2", CandidateStatus::Timeout),
        ];
        let out = run(&Synthesizer::with_judge(judge.clone()), &candidates).await;

        assert_eq!(judge.calls(), 0);
        assert_eq!(out.final_text.as_deref(), Some("only answer"));
        assert_eq!(out.winner_id.as_deref(), Some("agent-1"));
        assert_eq!(out.judge_model, None);
    }

    #[tokio::test]
    async fn test_judge_merges_candidates() {
        let judge = Arc::new(ScriptedJudge::answering("  merged answer \n"));
        let out = run(&Synthesizer::with_judge(judge.clone()), &two_answers()).await;

        assert_eq!(judge.calls(), 1);
        assert_eq!(out.final_text.as_deref(), Some("merged answer"));
        assert_eq!(out.judge_model.as_deref(), Some("gemini-3.1-pro-preview"));
        assert!(out.judge_latency_ms.is_some());
        assert_eq!(out.winner_id, None);
        assert_eq!(out.judge_fallback, None);

        let request = judge.last_request().unwrap();
        assert_eq!(request.model, "gemini-3.1-pro-preview");
        assert_eq!(request.timeout_seconds, 90);
        assert!(request.user_prompt.contains("USER PROMPT: prompt"));
        assert!(request.user_prompt.contains("this is longer"));
        assert!(request.user_prompt.contains("short"));
    }

    #[tokio::test]
    async fn test_judge_failure_falls_back() {
        let judge = Arc::new(ScriptedJudge::failing("judge exploded"));
        let out = run(&Synthesizer::with_judge(judge), &two_answers()).await;

        assert_eq!(out.final_text.as_deref(), Some("short"));
        assert_eq!(out.winner_id.as_deref(), Some("b"));
        assert_eq!(out.judge_model, None);
        assert!(out.judge_fallback.unwrap().contains("judge exploded"));
    }

    #[tokio::test]
    async fn test_empty_judge_output_falls_back() {
        let judge = Arc::new(ScriptedJudge::answering("   "));
        let out = run(&Synthesizer::with_judge(judge), &two_answers()).await;

        assert_eq!(out.winner_id.as_deref(), Some("b"));
        assert_eq!(
            out.judge_fallback.as_deref(),
            Some("worker returned empty output")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_judge_times_out_and_falls_back() {
        let judge = Arc::new(
            ScriptedJudge::answering("too late").with_delay(Duration::from_secs(600)),
        );
        let out = run(&Synthesizer::with_judge(judge), &two_answers()).await;

        assert_eq!(out.final_text.as_deref(), Some("short"));
        assert!(out.judge_fallback.unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_fallback_is_logged_and_reported() {
        struct Events(Mutex<Vec<&'static str>>);
        impl RoundLogger for Events {
            fn log(&self, event: RoundEvent) {
                self.0.lock().unwrap().push(event.event_type);
            }
        }
        struct Fallbacks(Mutex<Vec<String>>);
        impl RoundProgressNotifier for Fallbacks {
            fn on_dispatch_start(&self, _: usize) {}
            fn on_candidate_resolved(&self, _: &Candidate) {}
            fn on_quorum_evaluated(&self, _: &braintrust_domain::QuorumEvaluation) {}
            fn on_judge_fallback(&self, reason: &str) {
                self.0.lock().unwrap().push(reason.to_string());
            }
        }

        let events = Events(Mutex::new(Vec::new()));
        let fallbacks = Fallbacks(Mutex::new(Vec::new()));
        let synth = Synthesizer::with_judge(Arc::new(ScriptedJudge::failing("boom")));
        synth
            .synthesize(
                "prompt",
                &two_answers(),
                &BraintrustSettings::default(),
                &fallbacks,
                &events,
            )
            .await;

        assert_eq!(events.0.into_inner().unwrap(), ["judge_fallback"]);
        assert_eq!(fallbacks.0.into_inner().unwrap().len(), 1);
    }
}
