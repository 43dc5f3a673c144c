//! Shell command worker
//!
//! Runs one shell command per call. The prompt is written to the child's
//! stdin and the answer is read from stdout. Call metadata travels in
//! environment variables:
//!
//! | Variable | Value |
//! |----------|-------|
//! | `BRAINTRUST_ROLE` | scout role, or `judge` |
//! | `BRAINTRUST_MODEL` | model id for the call |
//! | `BRAINTRUST_TIMEOUT` | per-call budget in seconds |
//! | `BRAINTRUST_SYSTEM_PROMPT` | role instruction |
//!
//! A stdout that parses as a JSON object with a `text` field is read as a
//! full worker response (so a command can flag refusals explicitly);
//! anything else is taken as plain answer text.

use async_trait::async_trait;
use braintrust_application::ports::worker::{
    JudgeExecutor, JudgeRequest, JudgeResponse, WorkerError, WorkerExecutor, WorkerRequest,
};
use braintrust_domain::WorkerResponse;
use braintrust_domain::core::text::preview;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Maximum stderr characters carried into an error message
const STDERR_PREVIEW_CHARS: usize = 200;

/// Worker that answers by spawning a shell command
#[derive(Debug, Clone)]
pub struct CommandWorker {
    command: String,
}

impl CommandWorker {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn shell(&self) -> Command {
        if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", self.command.as_str()]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", self.command.as_str()]);
            c
        }
    }

    /// Spawn the command, feed `input` on stdin and collect trimmed stdout.
    async fn run(
        &self,
        env: &[(&str, String)],
        input: String,
        cancel: &CancellationToken,
    ) -> Result<String, WorkerError> {
        let mut cmd = self.shell();
        cmd.envs(env.iter().map(|(k, v)| (*k, v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| WorkerError::Process(format!("failed to spawn command: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            tokio::spawn(async move {
                // A command that ignores stdin may exit before reading it all.
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    debug!("worker stdin closed early: {}", e);
                }
            });
        }

        let output = tokio::select! {
            output = child.wait_with_output() => {
                output.map_err(|e| WorkerError::Process(e.to_string()))?
            }
            _ = cancel.cancelled() => return Err(WorkerError::Cancelled),
        };

        if !output.status.success() {
            let stderr = preview(
                &String::from_utf8_lossy(&output.stderr),
                STDERR_PREVIEW_CHARS,
            );
            warn!("worker command exited with {}", output.status);
            return Err(WorkerError::Process(if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(WorkerError::EmptyOutput);
        }
        Ok(stdout)
    }
}

/// Read stdout as a structured response when it is one
fn parse_response(stdout: String) -> WorkerResponse {
    if stdout.starts_with('{')
        && let Ok(response) = serde_json::from_str::<WorkerResponse>(&stdout)
    {
        return response;
    }
    WorkerResponse::text(stdout)
}

#[async_trait]
impl WorkerExecutor for CommandWorker {
    async fn execute(
        &self,
        request: WorkerRequest,
        cancel: CancellationToken,
    ) -> Result<WorkerResponse, WorkerError> {
        let env = [
            ("BRAINTRUST_ROLE", request.role.to_string()),
            ("BRAINTRUST_MODEL", request.model.clone()),
            ("BRAINTRUST_TIMEOUT", request.timeout_seconds.to_string()),
            ("BRAINTRUST_SYSTEM_PROMPT", request.system_prompt()),
        ];
        let stdout = self.run(&env, request.prompt, &cancel).await?;
        Ok(parse_response(stdout))
    }
}

#[async_trait]
impl JudgeExecutor for CommandWorker {
    async fn judge(
        &self,
        request: JudgeRequest,
        cancel: CancellationToken,
    ) -> Result<JudgeResponse, WorkerError> {
        let started = Instant::now();
        let env = [
            ("BRAINTRUST_ROLE", "judge".to_string()),
            ("BRAINTRUST_MODEL", request.model),
            ("BRAINTRUST_TIMEOUT", request.timeout_seconds.to_string()),
            ("BRAINTRUST_SYSTEM_PROMPT", request.system_prompt),
        ];
        let stdout = self.run(&env, request.user_prompt, &cancel).await?;
        Ok(JudgeResponse {
            text: stdout,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        })
    }
}
