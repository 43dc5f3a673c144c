//! Domain layer for braintrust
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Round
//!
//! One user prompt is answered by a small team of independent *scouts*.
//! Each scout yields a [`Candidate`] with a terminal [`CandidateStatus`].
//!
//! ## Quorum
//!
//! Before any answer is synthesized the round must clear two thresholds
//! ([`QuorumConfig`]): enough scouts participated, and enough answered.
//! A shortfall yields the fixed unavailability notice instead of an answer.
//!
//! ## Synthesis
//!
//! Usable candidates are reduced to one answer, either deterministically
//! (shortest answer, ties by id) or by an external judge.

pub mod core;
pub mod quorum;
pub mod round;
pub mod scout;
pub mod settings;
pub mod synthesis;

// Re-export commonly used types
pub use core::error::DomainError;
pub use core::output_format::OutputFormat;
pub use quorum::{
    NO_USABLE_CANDIDATE_REASON, QuorumConfig, QuorumEvaluation, build_unavailable_notice,
    evaluate_quorum, unavailable_notice,
};
pub use round::{CandidateTelemetry, RoundTelemetry, RuntimeBridgeResult};
pub use scout::{
    Candidate, CandidateStatus, PhraseRefusalPolicy, RefusalPolicy, ScoutRole, WorkerResponse,
    classify_failure, classify_reply,
};
pub use settings::{BraintrustSettings, Strategy, read_settings, read_settings_with_issues};
pub use synthesis::{PromptTemplate, SynthesisOutput, synthesize_deterministic};
