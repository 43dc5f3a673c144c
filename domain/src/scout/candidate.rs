//! Candidate entity: one scout's outcome for one dispatch round.

use super::role::ScoutRole;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Terminal status of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    /// The scout produced an answer
    Ok,
    /// The scout declined to answer (explicitly or heuristically detected)
    Refusal,
    /// The scout did not answer within the time budget
    Timeout,
    /// Any other worker failure
    Error,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Ok => "ok",
            CandidateStatus::Refusal => "refusal",
            CandidateStatus::Timeout => "timeout",
            CandidateStatus::Error => "error",
        }
    }

    /// Whether the scout took part in the round (answered or refused).
    pub fn is_participating(&self) -> bool {
        !matches!(self, CandidateStatus::Timeout | CandidateStatus::Error)
    }
}

impl std::fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CandidateStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ok" => Ok(CandidateStatus::Ok),
            "refusal" => Ok(CandidateStatus::Refusal),
            "timeout" => Ok(CandidateStatus::Timeout),
            "error" => Ok(CandidateStatus::Error),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// One scout's outcome for one round (Entity)
///
/// Created once when the slot resolves and never mutated afterwards.
/// `id` is positional (`agent-1`, ...) and only used for tie-breaking
/// and telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ScoutRole>,
    pub status: CandidateStatus,
    /// Trimmed answer text; only set when `status` is `Ok`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub latency_ms: u64,
    /// Failure message for `Timeout`/`Error` outcomes (telemetry only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Candidate {
    /// Bare candidate with a status and no text, as used by policy tests
    /// and host integrations that classify outcomes themselves.
    pub fn new(id: impl Into<String>, model: impl Into<String>, status: CandidateStatus) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            role: None,
            status,
            text: None,
            latency_ms: 0,
            error: None,
        }
    }

    /// Successful candidate carrying answer text.
    pub fn answered(
        id: impl Into<String>,
        model: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id, model, CandidateStatus::Ok)
        }
    }

    pub fn with_role(mut self, role: ScoutRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Answer text when this candidate is usable: status `Ok` and
    /// non-empty once trimmed.
    pub fn usable_text(&self) -> Option<&str> {
        if self.status != CandidateStatus::Ok {
            return None;
        }
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn is_usable(&self) -> bool {
        self.usable_text().is_some()
    }
}
