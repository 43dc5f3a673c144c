//! Scripted executors shared by the use case tests.

use crate::ports::worker::{
    JudgeExecutor, JudgeRequest, JudgeResponse, WorkerError, WorkerExecutor, WorkerRequest,
};
use async_trait::async_trait;
use braintrust_domain::{ScoutRole, WorkerResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// What a scripted worker does for one role
#[derive(Clone)]
pub(crate) enum Behavior {
    Reply(WorkerResponse),
    ReplyAfter(WorkerResponse, u64),
    Fail(String),
    Hang,
    Panic,
}

impl Behavior {
    pub(crate) fn reply_after(text: &str, delay_ms: u64) -> Self {
        Behavior::ReplyAfter(WorkerResponse::text(text), delay_ms)
    }
}

/// Worker whose behavior is scripted per scout role
pub(crate) struct ScriptedWorker {
    behaviors: HashMap<ScoutRole, Behavior>,
    fallback: Option<Behavior>,
    requests: Mutex<Vec<WorkerRequest>>,
    tokens: Mutex<Vec<(ScoutRole, CancellationToken)>>,
}

impl ScriptedWorker {
    pub(crate) fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            fallback: None,
            requests: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn answering_all(text: &str) -> Self {
        Self {
            fallback: Some(Behavior::Reply(WorkerResponse::text(text))),
            ..Self::new()
        }
    }

    pub(crate) fn on(mut self, role: ScoutRole, behavior: Behavior) -> Self {
        self.behaviors.insert(role, behavior);
        self
    }

    pub(crate) fn requested_models(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.model.clone())
            .collect()
    }

    pub(crate) fn requests(&self) -> Vec<WorkerRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn cancelled_roles(&self) -> Vec<ScoutRole> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, token)| token.is_cancelled())
            .map(|(role, _)| *role)
            .collect()
    }
}

#[async_trait]
impl WorkerExecutor for ScriptedWorker {
    async fn execute(
        &self,
        request: WorkerRequest,
        cancel: CancellationToken,
    ) -> Result<WorkerResponse, WorkerError> {
        let role = request.role;
        self.requests.lock().unwrap().push(request);
        self.tokens.lock().unwrap().push((role, cancel.clone()));

        let behavior = self
            .behaviors
            .get(&role)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or(Behavior::Fail("no script".to_string()));

        match behavior {
            Behavior::Reply(response) => Ok(response),
            Behavior::ReplyAfter(response, delay_ms) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(response)
            }
            Behavior::Fail(message) => Err(WorkerError::RequestFailed(message)),
            Behavior::Hang => {
                cancel.cancelled().await;
                Err(WorkerError::Cancelled)
            }
            Behavior::Panic => panic!("scripted worker panic"),
        }
    }
}

/// Judge returning queued results and counting calls
pub(crate) struct ScriptedJudge {
    results: Mutex<VecDeque<Result<JudgeResponse, WorkerError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<JudgeRequest>>,
}

impl ScriptedJudge {
    pub(crate) fn new(results: Vec<Result<JudgeResponse, WorkerError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn answering(text: &str) -> Self {
        Self::new(vec![Ok(JudgeResponse::new(text))])
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::new(vec![Err(WorkerError::Other(message.to_string()))])
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<JudgeRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl JudgeExecutor for ScriptedJudge {
    async fn judge(
        &self,
        request: JudgeRequest,
        _cancel: CancellationToken,
    ) -> Result<JudgeResponse, WorkerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(WorkerError::Other("no scripted judge result".to_string())))
    }
}
