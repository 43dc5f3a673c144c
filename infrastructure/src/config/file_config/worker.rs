//! Worker adapter configuration from TOML (`[worker]` section)
//!
//! ```toml
//! [worker]
//! kind = "command"
//! command = "my-llm --model \"$BRAINTRUST_MODEL\""
//! judge_command = "my-llm --model \"$BRAINTRUST_MODEL\" --system \"$BRAINTRUST_SYSTEM_PROMPT\""
//!
//! # or
//! kind = "http"
//! base_url = "https://api.openai.com/v1"
//! api_key_env = "OPENAI_API_KEY"
//! ```

use braintrust_domain::scout::{
    DEFAULT_HEURISTIC_MAX_CHARS, DEFAULT_REFUSAL_PHRASES, ExplicitOnlyRefusalPolicy,
    PhraseRefusalPolicy, RefusalPolicy,
};
use braintrust_domain::settings::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which adapter answers scout and judge calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerKind {
    /// Spawn a shell command per call
    #[default]
    Command,
    /// OpenAI-compatible chat completions endpoint
    Http,
}

impl WorkerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerKind::Command => "command",
            WorkerKind::Http => "http",
        }
    }
}

/// Raw `[worker]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkerConfig {
    pub kind: WorkerKind,
    /// Shell command run for each scout; the prompt arrives on stdin
    pub command: Option<String>,
    /// Shell command run for the judge; when unset there is no judge
    pub judge_command: Option<String>,
    /// Base URL of the chat completions API (`kind = "http"`)
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Refusal phrases; the built-in list when unset
    pub refusal_phrases: Option<Vec<String>>,
    /// Replies longer than this are never flagged by phrase
    pub refusal_max_chars: usize,
    /// Only trust explicit refusal flags
    pub explicit_refusal_only: bool,
}

impl Default for FileWorkerConfig {
    fn default() -> Self {
        Self {
            kind: WorkerKind::Command,
            command: None,
            judge_command: None,
            base_url: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            refusal_phrases: None,
            refusal_max_chars: DEFAULT_HEURISTIC_MAX_CHARS,
            explicit_refusal_only: false,
        }
    }
}

impl FileWorkerConfig {
    /// Refusal policy described by this section
    pub fn refusal_policy(&self) -> Arc<dyn RefusalPolicy> {
        if self.explicit_refusal_only {
            return Arc::new(ExplicitOnlyRefusalPolicy);
        }
        match &self.refusal_phrases {
            Some(phrases) => Arc::new(PhraseRefusalPolicy::new(
                phrases.iter().map(String::as_str),
                self.refusal_max_chars,
            )),
            None => Arc::new(PhraseRefusalPolicy::new(
                DEFAULT_REFUSAL_PHRASES.iter().copied(),
                self.refusal_max_chars,
            )),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("worker.command", &self.command),
            ("worker.judge_command", &self.judge_command),
        ] {
            if value.as_deref().is_some_and(|c| c.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingValue {
                        field: field.to_string(),
                    },
                    format!("{field} cannot be empty"),
                ));
            }
        }

        if self.kind == WorkerKind::Http
            && self.base_url.as_deref().is_none_or(|u| u.trim().is_empty())
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "worker.base_url".to_string(),
                },
                "worker.base_url is required when worker.kind = \"http\"",
            ));
        }

        if self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: "worker.api_key_env".to_string(),
                },
                "worker.api_key_env cannot be empty",
            ));
        }

        issues
    }
}
