//! Configuration file loading for braintrust
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BRAINTRUST_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./braintrust.toml` or `./.braintrust.toml`
//! 4. Global: `$XDG_CONFIG_HOME/braintrust/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBraintrustConfig, FileConfig, FileLoggingConfig, FileOutputConfig, FileWorkerConfig,
    WorkerKind,
};
pub use loader::{ConfigError, ConfigLoader};
