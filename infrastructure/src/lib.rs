//! Infrastructure layer for braintrust
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod workers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileBraintrustConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileWorkerConfig, WorkerKind,
};
pub use logging::JsonlRoundLogger;
pub use workers::CommandWorker;
#[cfg(feature = "http-worker")]
pub use workers::HttpWorker;
