//! Worker execution ports
//!
//! Defines how the application layer reaches the external capabilities that
//! actually answer prompts: scouts through [`WorkerExecutor`] and the
//! optional judge through [`JudgeExecutor`]. Adapters live in the
//! infrastructure layer.

use async_trait::async_trait;
use braintrust_domain::{PromptTemplate, ScoutRole, WorkerResponse};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while a worker or judge call is in flight
///
/// The `Display` text of every variant is what the outcome classifier sees,
/// so the timeout variant must keep the word "timeout" in its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("worker timeout after {0}s")]
    Timeout(u64),

    #[error("worker call cancelled")]
    Cancelled,

    #[error("worker returned empty output")]
    EmptyOutput,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One scout call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRequest {
    pub role: ScoutRole,
    pub model: String,
    /// The user prompt, unmodified
    pub prompt: String,
    /// Budget the adapter may forward to the remote side
    pub timeout_seconds: u64,
}

impl WorkerRequest {
    pub fn new(
        role: ScoutRole,
        model: impl Into<String>,
        prompt: impl Into<String>,
        timeout_seconds: u64,
    ) -> Self {
        Self {
            role,
            model: model.into(),
            prompt: prompt.into(),
            timeout_seconds,
        }
    }

    /// Role instruction adapters send alongside the prompt
    pub fn system_prompt(&self) -> String {
        PromptTemplate::scout_system(self.role)
    }
}

/// Capability that answers a single scout request
///
/// Implementations must observe `cancel`: once it fires the call result is
/// discarded, so any underlying process or request should be torn down.
#[async_trait]
pub trait WorkerExecutor: Send + Sync {
    async fn execute(
        &self,
        request: WorkerRequest,
        cancel: CancellationToken,
    ) -> Result<WorkerResponse, WorkerError>;
}

/// One judge call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub timeout_seconds: u64,
}

/// Judge reply. `latency_ms` is informational; the synthesizer measures its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeResponse {
    pub text: String,
    pub latency_ms: Option<u64>,
}

impl JudgeResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            latency_ms: None,
        }
    }
}

/// Capability that merges scout outputs into one answer
#[async_trait]
pub trait JudgeExecutor: Send + Sync {
    async fn judge(
        &self,
        request: JudgeRequest,
        cancel: CancellationToken,
    ) -> Result<JudgeResponse, WorkerError>;
}
