//! Scout domain: roles, candidates and outcome classification.
//!
//! A *scout* is a worker dispatched to answer the user prompt. Each scout
//! slot yields exactly one [`Candidate`] per round.

pub mod candidate;
pub mod classify;
pub mod role;

pub use candidate::{Candidate, CandidateStatus};
pub use classify::{
    Classification, DEFAULT_HEURISTIC_MAX_CHARS, DEFAULT_REFUSAL_PHRASES,
    ExplicitOnlyRefusalPolicy, PhraseRefusalPolicy, RefusalPolicy, WorkerResponse,
    classify_failure, classify_reply,
};
pub use role::{SCOUT_SLOTS, ScoutRole, ScoutSlot, scout_count, scout_slots, slot_id};
