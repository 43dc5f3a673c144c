//! Outcome classification for scout calls.
//!
//! A worker call either fails or returns a [`WorkerResponse`]. Failures are
//! split into `timeout` and `error` by message; responses become `refusal`
//! or `ok`. Refusal detection for responses without an explicit flag is
//! delegated to a [`RefusalPolicy`] so the phrase heuristic can be swapped
//! for a real classifier without touching dispatch code.

use super::candidate::CandidateStatus;
use crate::core::text::char_len;
use serde::{Deserialize, Serialize};

/// Raw reply from a worker-execution capability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerResponse {
    pub text: String,
    /// Explicit refusal flag; `None` defers to the refusal policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<bool>,
    /// Latency as reported by the worker (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl WorkerResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_refusal(mut self, refusal: bool) -> Self {
        self.refusal = Some(refusal);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }
}

/// Decides whether answer text is a refusal.
pub trait RefusalPolicy: Send + Sync {
    /// `text` is already trimmed.
    fn is_refusal(&self, text: &str) -> bool;
}

/// Phrases that mark a short answer as a refusal.
pub const DEFAULT_REFUSAL_PHRASES: &[&str] = &[
    "i can't",
    "i can’t",
    "i cannot",
    "cannot comply",
    "i'm sorry",
    "i’m sorry",
    "as an ai",
    "unable to assist",
    "i must refuse",
];

/// Answers longer than this are never treated as refusals.
pub const DEFAULT_HEURISTIC_MAX_CHARS: usize = 500;

/// Case-insensitive phrase matching, disabled for long answers
#[derive(Debug, Clone)]
pub struct PhraseRefusalPolicy {
    phrases: Vec<String>,
    max_chars: usize,
}

impl PhraseRefusalPolicy {
    pub fn new(phrases: impl IntoIterator<Item = impl Into<String>>, max_chars: usize) -> Self {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .collect(),
            max_chars,
        }
    }
}

impl Default for PhraseRefusalPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_REFUSAL_PHRASES.iter().copied(),
            DEFAULT_HEURISTIC_MAX_CHARS,
        )
    }
}

impl RefusalPolicy for PhraseRefusalPolicy {
    fn is_refusal(&self, text: &str) -> bool {
        if char_len(text) > self.max_chars {
            return false;
        }
        let lowered = text.to_lowercase();
        self.phrases.iter().any(|phrase| lowered.contains(phrase))
    }
}

/// Policy that never flags refusals (only explicit flags count).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitOnlyRefusalPolicy;

impl RefusalPolicy for ExplicitOnlyRefusalPolicy {
    fn is_refusal(&self, _text: &str) -> bool {
        false
    }
}

/// Status plus trimmed text (text only for `Ok`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: CandidateStatus,
    pub text: Option<String>,
}

/// Classify a worker reply.
pub fn classify_reply(response: &WorkerResponse, policy: &dyn RefusalPolicy) -> Classification {
    let trimmed = response.text.trim();
    let refused = match response.refusal {
        Some(flag) => flag,
        None => policy.is_refusal(trimmed),
    };

    if refused {
        Classification {
            status: CandidateStatus::Refusal,
            text: None,
        }
    } else {
        Classification {
            status: CandidateStatus::Ok,
            text: Some(trimmed.to_string()),
        }
    }
}

/// Classify a worker failure by its message.
pub fn classify_failure(message: &str) -> CandidateStatus {
    if message.to_lowercase().contains("timeout") {
        CandidateStatus::Timeout
    } else {
        CandidateStatus::Error
    }
}
