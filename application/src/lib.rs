//! Application layer for braintrust
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    progress::{NoProgress, RoundProgressNotifier},
    round_logger::{NoRoundLogger, RoundEvent, RoundLogger},
    worker::{
        JudgeExecutor, JudgeRequest, JudgeResponse, WorkerError, WorkerExecutor, WorkerRequest,
    },
};
pub use use_cases::controller::{
    BraintrustAction, BraintrustController, ContentPart, HostMessage, MessageContent,
    extract_prompt,
};
pub use use_cases::dispatch::ScoutDispatcher;
pub use use_cases::run_round::{RunRoundError, RunRoundInput, RunRoundOutput, RunRoundUseCase};
pub use use_cases::synthesize::Synthesizer;
