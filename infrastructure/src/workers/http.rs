//! OpenAI-compatible chat completions worker
//!
//! Sends `POST {base_url}/chat/completions` with a system and a user
//! message and reads `choices[0].message.content` from the reply.

use async_trait::async_trait;
use braintrust_application::ports::worker::{
    JudgeExecutor, JudgeRequest, JudgeResponse, WorkerError, WorkerExecutor, WorkerRequest,
};
use braintrust_domain::WorkerResponse;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Worker backed by an OpenAI-compatible HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpWorker {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpWorker {
    /// Build a worker, reading the API key from `api_key_env` when set
    pub fn new(base_url: impl Into<String>, api_key_env: &str) -> Result<Self, WorkerError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| WorkerError::Other(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: std::env::var(api_key_env).ok().filter(|k| !k.is_empty()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn complete(
        &self,
        model: &str,
        system: &str,
        user: &str,
        timeout_seconds: u64,
        cancel: &CancellationToken,
    ) -> Result<String, WorkerError> {
        let body = chat_body(model, system, user);

        let mut request = self
            .client
            .post(self.endpoint())
            .timeout(Duration::from_secs(timeout_seconds.max(1)))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!("POST {} model={}", self.endpoint(), model);

        let call = async {
            let response = request.send().await.map_err(|e| map_error(e, timeout_seconds))?;
            if !response.status().is_success() {
                return Err(WorkerError::RequestFailed(format!(
                    "API returned {}",
                    response.status()
                )));
            }
            let json: Value = response
                .json()
                .await
                .map_err(|e| map_error(e, timeout_seconds))?;
            extract_content(&json)
        };

        tokio::select! {
            result = call => result,
            _ = cancel.cancelled() => Err(WorkerError::Cancelled),
        }
    }
}

fn chat_body(model: &str, system: &str, user: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user },
        ],
    })
}

fn map_error(err: reqwest::Error, timeout_seconds: u64) -> WorkerError {
    if err.is_timeout() {
        WorkerError::Timeout(timeout_seconds)
    } else {
        WorkerError::RequestFailed(err.to_string())
    }
}

fn extract_content(json: &Value) -> Result<String, WorkerError> {
    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| {
            WorkerError::RequestFailed("response has no choices[0].message.content".to_string())
        })?
        .trim();
    if content.is_empty() {
        return Err(WorkerError::EmptyOutput);
    }
    Ok(content.to_string())
}

#[async_trait]
impl WorkerExecutor for HttpWorker {
    async fn execute(
        &self,
        request: WorkerRequest,
        cancel: CancellationToken,
    ) -> Result<WorkerResponse, WorkerError> {
        let text = self
            .complete(
                &request.model,
                &request.system_prompt(),
                &request.prompt,
                request.timeout_seconds,
                &cancel,
            )
            .await?;
        Ok(WorkerResponse::text(text))
    }
}

#[async_trait]
impl JudgeExecutor for HttpWorker {
    async fn judge(
        &self,
        request: JudgeRequest,
        cancel: CancellationToken,
    ) -> Result<JudgeResponse, WorkerError> {
        let started = Instant::now();
        let text = self
            .complete(
                &request.model,
                &request.system_prompt,
                &request.user_prompt,
                request.timeout_seconds,
                &cancel,
            )
            .await?;
        Ok(JudgeResponse {
            text,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        })
    }
}
