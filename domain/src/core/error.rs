//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Unknown strategy: {0}. Valid: independent, debate, panel")]
    UnknownStrategy(String),

    #[error("Unknown candidate status: {0}. Valid: ok, refusal, timeout, error")]
    UnknownStatus(String),

    #[error("Unknown scout role: {0}. Valid: solver, critic, researcher")]
    UnknownRole(String),
}
