//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod braintrust;
mod logging;
mod output;
mod worker;

pub use braintrust::FileBraintrustConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use worker::{FileWorkerConfig, WorkerKind};

use braintrust_domain::BraintrustSettings;
use braintrust_domain::scout::scout_count;
use braintrust_domain::settings::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Braintrust settings, validated by the domain reader
    pub braintrust: FileBraintrustConfig,
    /// Worker adapter selection
    pub worker: FileWorkerConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Structured logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validated Braintrust settings. Never fails; see [`Self::validate`]
    /// for what was adjusted.
    pub fn settings(&self) -> BraintrustSettings {
        self.braintrust.to_settings().0
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// It checks:
    /// 1. Braintrust settings that were clamped, replaced or left empty
    /// 2. A participation minimum the dispatched scouts can never reach
    /// 3. Worker settings the selected adapter cannot run with
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (settings, mut issues) = self.braintrust.to_settings();

        let scouts = scout_count(settings.team_size);
        if settings.min_participating_agents > scouts {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnreachableQuorum {
                    required: settings.min_participating_agents,
                    scouts,
                },
                format!(
                    "minParticipatingAgents={} but only {} scouts are dispatched; every round will be unavailable",
                    settings.min_participating_agents, scouts
                ),
            ));
        }

        issues.extend(self.worker.validate());
        issues
    }
}
