//! Scout dispatch
//!
//! Fans one prompt out to every scout slot concurrently, races each slot
//! against the round's timeout and waits for all of them before returning.

use crate::ports::progress::RoundProgressNotifier;
use crate::ports::worker::{WorkerExecutor, WorkerRequest};
use braintrust_domain::scout::{scout_slots, slot_id};
use braintrust_domain::{
    BraintrustSettings, Candidate, CandidateStatus, PhraseRefusalPolicy, RefusalPolicy,
    classify_failure, classify_reply,
};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Launches scouts and collects one [`Candidate`] per slot
pub struct ScoutDispatcher {
    worker: Arc<dyn WorkerExecutor>,
    refusal_policy: Arc<dyn RefusalPolicy>,
}

impl ScoutDispatcher {
    pub fn new(worker: Arc<dyn WorkerExecutor>) -> Self {
        Self {
            worker,
            refusal_policy: Arc::new(PhraseRefusalPolicy::default()),
        }
    }

    pub fn with_refusal_policy(mut self, policy: Arc<dyn RefusalPolicy>) -> Self {
        self.refusal_policy = policy;
        self
    }

    /// Run every slot for `settings.team_size` and return candidates in slot
    /// order. Never fails: slot failures become candidate statuses.
    pub async fn dispatch(
        &self,
        prompt: &str,
        settings: &BraintrustSettings,
        progress: &dyn RoundProgressNotifier,
    ) -> Vec<Candidate> {
        let slots = scout_slots(settings.team_size);
        let budget = settings.timeout();

        info!(
            "Dispatching {} scouts (timeout {}s)",
            slots.len(),
            settings.timeout_seconds
        );
        progress.on_dispatch_start(slots.len());

        let mut pending = FuturesUnordered::new();
        for (index, slot) in slots.iter().enumerate() {
            let id = slot_id(index);
            let model = slot.model(settings).to_string();
            let role = slot.role;
            let request = WorkerRequest::new(role, model.clone(), prompt, settings.timeout_seconds);
            let worker = Arc::clone(&self.worker);
            let policy = Arc::clone(&self.refusal_policy);
            let cancel = CancellationToken::new();

            debug!("Launching {} ({}, {})", id, role, model);
            let handle = tokio::spawn(run_slot(
                worker,
                policy,
                request,
                id.clone(),
                budget,
                cancel,
            ));
            let started = Instant::now();
            pending.push(async move { (index, id, model, role, started, handle.await) });
        }

        let mut resolved: Vec<Option<Candidate>> = (0..slots.len()).map(|_| None).collect();
        while let Some((index, id, model, role, started, joined)) = pending.next().await {
            let candidate = match joined {
                Ok(candidate) => candidate,
                Err(join_error) => {
                    warn!("Scout {} task failed: {}", id, join_error);
                    Candidate::new(id, model, CandidateStatus::Error)
                        .with_role(role)
                        .with_latency(elapsed_ms(started))
                        .with_error(join_error.to_string())
                }
            };
            info!(
                "Scout {} ({}) resolved: {} in {}ms",
                candidate.id, candidate.model, candidate.status, candidate.latency_ms
            );
            progress.on_candidate_resolved(&candidate);
            resolved[index] = Some(candidate);
        }

        resolved.into_iter().flatten().collect()
    }
}

/// One slot: the worker call raced against `budget`.
async fn run_slot(
    worker: Arc<dyn WorkerExecutor>,
    policy: Arc<dyn RefusalPolicy>,
    request: WorkerRequest,
    id: String,
    budget: Duration,
    cancel: CancellationToken,
) -> Candidate {
    let role = request.role;
    let model = request.model.clone();
    let started = Instant::now();

    let outcome = tokio::time::timeout(budget, worker.execute(request, cancel.clone())).await;
    let latency_ms = elapsed_ms(started);

    let candidate = match outcome {
        Err(_) => {
            cancel.cancel();
            Candidate::new(id, model, CandidateStatus::Timeout)
                .with_error(format!("timeout after {}s", budget.as_secs()))
        }
        Ok(Err(error)) => {
            let message = error.to_string();
            Candidate::new(id, model, classify_failure(&message)).with_error(message)
        }
        Ok(Ok(response)) => {
            let classification = classify_reply(&response, policy.as_ref());
            Candidate {
                text: classification.text,
                ..Candidate::new(id, model, classification.status)
            }
        }
    };

    candidate.with_role(role).with_latency(latency_ms)
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
