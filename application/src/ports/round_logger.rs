//! Port for structured round logging.
//!
//! Defines the [`RoundLogger`] trait for recording round events (dispatch,
//! each candidate, the quorum verdict, judge fallbacks) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures round
//! telemetry in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured round event for logging.
pub struct RoundEvent {
    /// Event type identifier (e.g., "round_started", "candidate_resolved").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RoundEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging round events to a structured log.
///
/// `log` is synchronous and non-fallible; logging failures never disturb a
/// round.
pub trait RoundLogger: Send + Sync {
    /// Record a round event.
    fn log(&self, event: RoundEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRoundLogger;

impl RoundLogger for NoRoundLogger {
    fn log(&self, _event: RoundEvent) {}
}
