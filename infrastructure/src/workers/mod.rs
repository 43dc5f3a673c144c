//! Worker adapters
//!
//! Implementations of [`WorkerExecutor`](braintrust_application::WorkerExecutor)
//! and [`JudgeExecutor`](braintrust_application::JudgeExecutor):
//!
//! - [`CommandWorker`]: one shell command per call (always available)
//! - `HttpWorker`: OpenAI-compatible chat completions (`http-worker` feature)

mod command;
#[cfg(feature = "http-worker")]
mod http;

pub use command::CommandWorker;
#[cfg(feature = "http-worker")]
pub use http::HttpWorker;
