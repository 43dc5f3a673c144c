//! Braintrust settings from TOML (`[braintrust]` section)
//!
//! Values are kept loosely typed here and handed to the domain settings
//! reader, which owns defaults and clamping. Keys may be written in
//! snake_case or in the host plugin's camelCase.
//!
//! ```toml
//! [braintrust]
//! enabled = true
//! team_size = 3                 # or teamSize
//! strategy = "panel"
//! model = "gemini-3-flash-preview"
//! critic_model = "openai-codex/gpt-5.3-codex"
//! researcher_model = "grok-4-1-fast-reasoning"
//! synth_model = "gemini-3.1-pro-preview"
//! timeout_seconds = 90
//! min_participating_agents = 2
//! min_answering_agents = 2
//! ```

use braintrust_domain::settings::ConfigIssue;
use braintrust_domain::{BraintrustSettings, read_settings_with_issues};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw `[braintrust]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBraintrustConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Value>,
    #[serde(alias = "teamSize", skip_serializing_if = "Option::is_none")]
    pub team_size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(alias = "criticModel", skip_serializing_if = "Option::is_none")]
    pub critic_model: Option<Value>,
    #[serde(alias = "researcherModel", skip_serializing_if = "Option::is_none")]
    pub researcher_model: Option<Value>,
    #[serde(alias = "synthModel", skip_serializing_if = "Option::is_none")]
    pub synth_model: Option<Value>,
    #[serde(alias = "timeoutSeconds", skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<Value>,
    #[serde(
        alias = "minParticipatingAgents",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_participating_agents: Option<Value>,
    #[serde(alias = "minAnsweringAgents", skip_serializing_if = "Option::is_none")]
    pub min_answering_agents: Option<Value>,
}

impl FileBraintrustConfig {
    /// The section as the host would hand it over: camelCase keys, only
    /// the fields that were set.
    pub fn to_raw(&self) -> Map<String, Value> {
        let fields = [
            ("enabled", &self.enabled),
            ("teamSize", &self.team_size),
            ("strategy", &self.strategy),
            ("model", &self.model),
            ("criticModel", &self.critic_model),
            ("researcherModel", &self.researcher_model),
            ("synthModel", &self.synth_model),
            ("timeoutSeconds", &self.timeout_seconds),
            ("minParticipatingAgents", &self.min_participating_agents),
            ("minAnsweringAgents", &self.min_answering_agents),
        ];
        fields
            .into_iter()
            .filter_map(|(key, value)| value.clone().map(|v| (key.to_string(), v)))
            .collect()
    }

    /// Validated settings plus every adjustment the reader made.
    pub fn to_settings(&self) -> (BraintrustSettings, Vec<ConfigIssue>) {
        read_settings_with_issues(Some(&self.to_raw()))
    }
}
