//! Braintrust host controller
//!
//! The stateful surface a host talks to: an on/off toggle, the
//! `on|off|status|unavailable` command, and the prompt-context hook that
//! runs a round (or injects the policy-only prelude) before the host's own
//! model answers.

use super::run_round::{RunRoundInput, RunRoundUseCase};
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use braintrust_domain::{
    BraintrustSettings, QuorumConfig, QuorumEvaluation, build_unavailable_notice,
};
use serde::Deserialize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

const MODE_HEADER: &str = "BRAINTRUST MODE ACTIVE.";

/// Command accepted by [`BraintrustController::execute_action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraintrustAction {
    On,
    Off,
    Status,
    Unavailable,
}

impl BraintrustAction {
    /// Lenient parse: trimmed, case-insensitive; anything unknown is `Status`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("on") => BraintrustAction::On,
            Some("off") => BraintrustAction::Off,
            Some("unavailable") => BraintrustAction::Unavailable,
            _ => BraintrustAction::Status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BraintrustAction::On => "on",
            BraintrustAction::Off => "off",
            BraintrustAction::Status => "status",
            BraintrustAction::Unavailable => "unavailable",
        }
    }
}

/// A chat message as handed over by the host
#[derive(Debug, Clone, Deserialize)]
pub struct HostMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: MessageContent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(serde_json::Value),
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Other(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text(String),
    Object {
        #[serde(default)]
        text: Option<String>,
    },
    Other(serde_json::Value),
}

impl ContentPart {
    fn text(&self) -> &str {
        match self {
            ContentPart::Text(text) => text,
            ContentPart::Object { text: Some(text) } => text,
            _ => "",
        }
    }
}

/// Text of the last user message.
///
/// String content is returned as is; part lists are joined by newlines and
/// skipped when they hold no text.
pub fn extract_prompt(messages: &[HostMessage]) -> Option<String> {
    for message in messages.iter().rev() {
        if message.role != "user" {
            continue;
        }
        match &message.content {
            MessageContent::Text(text) => return Some(text.clone()),
            MessageContent::Parts(parts) => {
                let text = parts
                    .iter()
                    .map(ContentPart::text)
                    .collect::<Vec<_>>()
                    .join("\n");
                let text = text.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
            MessageContent::Other(_) => {}
        }
    }
    None
}

/// Host-facing Braintrust state
pub struct BraintrustController {
    settings: BraintrustSettings,
    enabled: AtomicBool,
    last_evaluation: Mutex<Option<QuorumEvaluation>>,
    round: Option<RunRoundUseCase>,
}

impl BraintrustController {
    /// Controller without a worker executor: prompt context is policy-only.
    pub fn new(settings: BraintrustSettings) -> Self {
        Self {
            enabled: AtomicBool::new(settings.enabled),
            settings,
            last_evaluation: Mutex::new(None),
            round: None,
        }
    }

    /// Run real rounds through `round` in [`Self::prompt_context`].
    pub fn with_round(mut self, round: RunRoundUseCase) -> Self {
        self.round = Some(round);
        self
    }

    pub fn settings(&self) -> &BraintrustSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn last_evaluation(&self) -> Option<QuorumEvaluation> {
        match self.last_evaluation.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record_evaluation(&self, evaluation: QuorumEvaluation) {
        match self.last_evaluation.lock() {
            Ok(mut guard) => *guard = Some(evaluation),
            Err(poisoned) => *poisoned.into_inner() = Some(evaluation),
        }
    }

    /// One-line summary of settings and the last quorum verdict.
    pub fn status_line(&self) -> String {
        let s = &self.settings;
        let quorum = match self.last_evaluation() {
            Some(evaluation) => evaluation.summary(),
            None => format!("quorum: {}", QuorumConfig::default()),
        };
        [
            format!("Braintrust: {}", if self.is_enabled() { "ON" } else { "OFF" }),
            format!("strategy={}", s.strategy),
            format!("teamSize={}", s.team_size),
            format!("solver={}", s.model),
            format!("critic={}", s.critic_model),
            format!("researcher={}", s.researcher_model),
            format!("synth={}", s.synth_model),
            format!("timeout={}s", s.timeout_seconds),
            format!("minParticipating={}", s.min_participating_agents),
            format!("minAnswering={}", s.min_answering_agents),
            quorum,
        ]
        .join(" · ")
    }

    /// Notice for the last evaluation, or a zero-participation notice
    /// before any round has run.
    pub fn unavailable_notice(&self) -> String {
        let evaluation = self.last_evaluation().unwrap_or_else(|| {
            QuorumEvaluation::unavailable(
                self.settings.team_size,
                format!("only 0/{} agents participated", self.settings.team_size),
            )
        });
        build_unavailable_notice(&evaluation)
    }

    pub fn execute_action(&self, action: BraintrustAction) -> String {
        match action {
            BraintrustAction::On => {
                self.set_enabled(true);
                format!("✅ {}", self.status_line())
            }
            BraintrustAction::Off => {
                self.set_enabled(false);
                format!("🛑 {}", self.status_line())
            }
            BraintrustAction::Unavailable => self.unavailable_notice(),
            BraintrustAction::Status => self.status_line(),
        }
    }

    /// Context to prepend to the host prompt, or `None` while disabled.
    pub async fn prompt_context(&self, messages: &[HostMessage]) -> Option<String> {
        self.prompt_context_with_progress(messages, &NoProgress).await
    }

    pub async fn prompt_context_with_progress(
        &self,
        messages: &[HostMessage],
        progress: &dyn RoundProgressNotifier,
    ) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        let prompt = extract_prompt(messages).filter(|p| !p.trim().is_empty());
        let (Some(prompt), Some(round)) = (prompt, &self.round) else {
            info!("Runtime bridge unavailable, using policy-only prompt injection");
            return Some(self.policy_only());
        };

        let input = RunRoundInput::new(prompt, self.settings.clone());
        let output = match round.execute_with_progress(input, progress).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Round could not start: {}", e);
                return Some(self.policy_only());
            }
        };
        info!(
            "Runtime bridge complete unavailable={} candidates={}",
            output.result.unavailable,
            output.result.candidates.len()
        );
        self.record_evaluation(output.evaluation);

        let result = output.result;
        if result.unavailable {
            Some(format!(
                "{MODE_HEADER}\nQuorum could not be satisfied by runtime-bridge execution.\nReturn exactly this notice: {}",
                result.final_text
            ))
        } else {
            Some(format!(
                "{MODE_HEADER}\n\nUse this runtime-bridge synthesis as your final answer.\n\n{}",
                result.final_text
            ))
        }
    }

    /// Prelude that asks the host model to simulate the panel itself.
    /// Records a passing evaluation for the full team.
    fn policy_only(&self) -> String {
        let s = &self.settings;
        self.record_evaluation(QuorumEvaluation {
            participating: s.team_size,
            answering: s.team_size,
            refused: 0,
            failed: 0,
            meets_quorum: true,
            reason: None,
        });
        [
            MODE_HEADER.to_string(),
            format!(
                "Use a {}-agent internal panel with strategy={}.",
                s.team_size, s.strategy
            ),
            format!(
                "Simulate roles: solver(model={}), critic(model={}), synthesizer(model={}).",
                s.model, s.critic_model, s.synth_model
            ),
            format!(
                "Quorum contract: require >={} participating and >={} answering agents.",
                s.min_participating_agents, s.min_answering_agents
            ),
            "If quorum cannot be satisfied, return exactly: Braintrust temporarily unavailable (...)."
                .to_string(),
            "Return only one final answer to the user.".to_string(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Behavior, ScriptedWorker};
    use braintrust_domain::{ScoutRole, WorkerResponse};
    use serde_json::json;
    use std::sync::Arc;

    fn enabled_settings() -> BraintrustSettings {
        BraintrustSettings {
            enabled: true,
            ..BraintrustSettings::default()
        }
    }

    fn messages(value: serde_json::Value) -> Vec<HostMessage> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(BraintrustAction::parse(Some(" ON ")), BraintrustAction::On);
        assert_eq!(BraintrustAction::parse(Some("off")), BraintrustAction::Off);
        assert_eq!(
            BraintrustAction::parse(Some("Unavailable")),
            BraintrustAction::Unavailable
        );
        assert_eq!(BraintrustAction::parse(Some("bogus")), BraintrustAction::Status);
        assert_eq!(BraintrustAction::parse(None), BraintrustAction::Status);
    }

    #[test]
    fn test_status_line_before_any_round() {
        let controller = BraintrustController::new(BraintrustSettings::default());
        assert_eq!(
            controller.status_line(),
            "Braintrust: OFF · strategy=panel · teamSize=3 · solver=gemini-3-flash-preview · \
             critic=openai-codex/gpt-5.3-codex · researcher=grok-4-1-fast-reasoning · \
             synth=gemini-3.1-pro-preview · timeout=90s · minParticipating=2 · minAnswering=2 · \
             quorum: 2/2"
        );
    }

    #[test]
    fn test_on_off_toggle() {
        let controller = BraintrustController::new(BraintrustSettings::default());

        let on = controller.execute_action(BraintrustAction::On);
        assert!(on.starts_with("✅ Braintrust: ON"));
        assert!(controller.is_enabled());

        let off = controller.execute_action(BraintrustAction::Off);
        assert!(off.starts_with("🛑 Braintrust: OFF"));
        assert!(!controller.is_enabled());

        assert_eq!(
            controller.execute_action(BraintrustAction::Status),
            controller.status_line()
        );
    }

    #[test]
    fn test_unavailable_before_any_round() {
        let controller = BraintrustController::new(BraintrustSettings::default());
        assert_eq!(
            controller.execute_action(BraintrustAction::Unavailable),
            "Braintrust temporarily unavailable (only 0/3 agents participated)."
        );
    }

    #[test]
    fn test_extract_prompt() {
        let msgs = messages(json!([
            {"role": "user", "content": "first"},
            {"role": "assistant", "content": "reply"},
            {"role": "user", "content": [{"type": "text", "text": "line one"}, "line two", {"type": "image"}]},
            {"role": "tool", "content": 42},
        ]));
        assert_eq!(extract_prompt(&msgs).as_deref(), Some("line one\nline two"));

        let msgs = messages(json!([
            {"role": "user", "content": "older"},
            {"role": "user", "content": [{"type": "image"}]},
        ]));
        assert_eq!(extract_prompt(&msgs).as_deref(), Some("older"));

        let msgs = messages(json!([{"role": "user"}, {"content": "no role"}]));
        assert_eq!(extract_prompt(&msgs), None);
    }

    #[tokio::test]
    async fn test_disabled_controller_adds_nothing() {
        let controller = BraintrustController::new(BraintrustSettings::default());
        let msgs = messages(json!([{"role": "user", "content": "Hello"}]));
        assert_eq!(controller.prompt_context(&msgs).await, None);
    }

    #[tokio::test]
    async fn test_policy_only_without_executor() {
        let controller = BraintrustController::new(enabled_settings());
        let msgs = messages(json!([{"role": "user", "content": "Hello"}]));

        let context = controller.prompt_context(&msgs).await.unwrap();

        assert_eq!(
            context,
            "BRAINTRUST MODE ACTIVE.\n\
             Use a 3-agent internal panel with strategy=panel.\n\
             Simulate roles: solver(model=gemini-3-flash-preview), critic(model=openai-codex/gpt-5.3-codex), synthesizer(model=gemini-3.1-pro-preview).\n\
             Quorum contract: require >=2 participating and >=2 answering agents.\n\
             If quorum cannot be satisfied, return exactly: Braintrust temporarily unavailable (...).\n\
             Return only one final answer to the user."
        );
        assert!(controller.status_line().ends_with(
            "participating=3 answering=3 refused=0 failed=0"
        ));
    }

    #[tokio::test]
    async fn test_policy_only_without_prompt() {
        let round = RunRoundUseCase::new(Arc::new(ScriptedWorker::answering_all("4")));
        let controller = BraintrustController::new(enabled_settings()).with_round(round);

        let context = controller.prompt_context(&[]).await.unwrap();
        assert!(context.contains("Simulate roles:"));
    }

    #[tokio::test]
    async fn test_runtime_bridge_synthesis() {
        let worker = ScriptedWorker::answering_all("4").on(
            ScoutRole::Critic,
            Behavior::Reply(WorkerResponse::text("The answer is likely four.")),
        );
        let worker = Arc::new(worker);
        let controller = BraintrustController::new(enabled_settings())
            .with_round(RunRoundUseCase::new(worker.clone()));
        let msgs = messages(json!([{"role": "user", "content": "What is 2+2?"}]));

        let context = controller.prompt_context(&msgs).await.unwrap();

        assert_eq!(worker.requested_models().len(), 3);
        assert_eq!(
            context,
            "BRAINTRUST MODE ACTIVE.\n\nUse this runtime-bridge synthesis as your final answer.\n\n4"
        );
        assert!(controller.last_evaluation().unwrap().meets_quorum);
    }

    #[tokio::test]
    async fn test_runtime_bridge_unavailable() {
        let worker = ScriptedWorker::new()
            .on(ScoutRole::Solver, Behavior::Reply(WorkerResponse::text("4")))
            .on(ScoutRole::Critic, Behavior::Fail("timeout".to_string()))
            .on(ScoutRole::Researcher, Behavior::Fail("boom".to_string()));
        let controller = BraintrustController::new(enabled_settings())
            .with_round(RunRoundUseCase::new(Arc::new(worker)));
        let msgs = messages(json!([{"role": "user", "content": "What is 2+2?"}]));

        let context = controller.prompt_context(&msgs).await.unwrap();

        assert_eq!(
            context,
            "BRAINTRUST MODE ACTIVE.\n\
             Quorum could not be satisfied by runtime-bridge execution.\n\
             Return exactly this notice: Braintrust temporarily unavailable (only 1/3 agents participated)."
        );
        assert_eq!(
            controller.execute_action(BraintrustAction::Unavailable),
            "Braintrust temporarily unavailable (only 1/3 agents participated)."
        );
        assert!(controller.status_line().ends_with(
            "participating=1 answering=1 refused=0 failed=2"
        ));
    }
}
