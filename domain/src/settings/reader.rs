//! Braintrust settings and the raw-config reader.
//!
//! Raw host configuration is a loosely-typed JSON object (camelCase keys,
//! as in the host plugin schema). [`read_settings`] turns it into validated
//! [`BraintrustSettings`], applying the clamping contract:
//!
//! 1. `teamSize` is clamped to `[1, 4]`
//! 2. `minParticipatingAgents` is clamped to `[1, teamSize]`
//! 3. `minAnsweringAgents` is clamped to `[1, minParticipatingAgents]`
//!
//! Each clamp depends on the previous one's result, so they run in order.

use super::strategy::Strategy;
use super::validation::{ConfigIssue, ConfigIssueCode};
use crate::quorum::QuorumConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

pub const MIN_TEAM_SIZE: usize = 1;
pub const MAX_TEAM_SIZE: usize = 4;
pub const MIN_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Validated Braintrust settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BraintrustSettings {
    pub enabled: bool,
    pub team_size: usize,
    pub strategy: Strategy,
    /// Solver scout model (slot 0)
    pub model: String,
    /// Critic scout model (slot 1)
    pub critic_model: String,
    /// Researcher scout model (slot 2)
    pub researcher_model: String,
    /// Judge model, never assigned to a scout
    pub synth_model: String,
    pub timeout_seconds: u64,
    pub min_participating_agents: usize,
    pub min_answering_agents: usize,
}

impl Default for BraintrustSettings {
    fn default() -> Self {
        let quorum = QuorumConfig::default();
        Self {
            enabled: false,
            team_size: 3,
            strategy: Strategy::Panel,
            model: "gemini-3-flash-preview".to_string(),
            critic_model: "openai-codex/gpt-5.3-codex".to_string(),
            researcher_model: "grok-4-1-fast-reasoning".to_string(),
            synth_model: "gemini-3.1-pro-preview".to_string(),
            timeout_seconds: 90,
            min_participating_agents: quorum.min_participating_agents,
            min_answering_agents: quorum.min_answering_agents,
        }
    }
}

impl BraintrustSettings {
    /// Quorum thresholds for this team.
    pub fn quorum(&self) -> QuorumConfig {
        QuorumConfig::new(self.min_participating_agents, self.min_answering_agents)
    }

    /// Per-call time budget shared by scouts and the judge.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Read settings from raw host configuration. `None` yields the defaults.
pub fn read_settings(raw: Option<&Map<String, Value>>) -> BraintrustSettings {
    read_settings_with_issues(raw).0
}

/// Like [`read_settings`], also reporting every value that was replaced or
/// clamped.
pub fn read_settings_with_issues(
    raw: Option<&Map<String, Value>>,
) -> (BraintrustSettings, Vec<ConfigIssue>) {
    let empty = Map::new();
    let raw = raw.unwrap_or(&empty);
    let defaults = BraintrustSettings::default();
    let mut issues = Vec::new();

    let strategy = match raw.get("strategy") {
        None | Some(Value::Null) => defaults.strategy,
        Some(value) => match value.as_str().map(str::parse::<Strategy>) {
            Some(Ok(strategy)) => strategy,
            _ => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "strategy".to_string(),
                        value: display_value(value),
                        valid_values: vec![
                            "independent".to_string(),
                            "debate".to_string(),
                            "panel".to_string(),
                        ],
                    },
                    format!(
                        "strategy: unknown value '{}', falling back to '{}'",
                        display_value(value),
                        defaults.strategy
                    ),
                ));
                defaults.strategy
            }
        },
    };

    let team_size = clamp_int(
        raw,
        "teamSize",
        MIN_TEAM_SIZE as i64,
        MAX_TEAM_SIZE as i64,
        defaults.team_size as i64,
        &mut issues,
    ) as usize;
    let min_participating_agents = clamp_int(
        raw,
        "minParticipatingAgents",
        1,
        team_size as i64,
        defaults.min_participating_agents as i64,
        &mut issues,
    ) as usize;
    let min_answering_agents = clamp_int(
        raw,
        "minAnsweringAgents",
        1,
        min_participating_agents as i64,
        defaults.min_answering_agents as i64,
        &mut issues,
    ) as usize;
    let timeout_seconds = clamp_int(
        raw,
        "timeoutSeconds",
        MIN_TIMEOUT_SECONDS as i64,
        MAX_TIMEOUT_SECONDS as i64,
        defaults.timeout_seconds as i64,
        &mut issues,
    ) as u64;

    let settings = BraintrustSettings {
        enabled: read_flag(raw.get("enabled"), defaults.enabled),
        team_size,
        strategy,
        model: read_model(raw, "model", defaults.model, &mut issues),
        critic_model: read_model(raw, "criticModel", defaults.critic_model, &mut issues),
        researcher_model: read_model(
            raw,
            "researcherModel",
            defaults.researcher_model,
            &mut issues,
        ),
        synth_model: read_model(raw, "synthModel", defaults.synth_model, &mut issues),
        timeout_seconds,
        min_participating_agents,
        min_answering_agents,
    };

    (settings, issues)
}

/// Numeric value of a raw field: JSON numbers and numeric strings count,
/// fractions are truncated toward zero.
fn numeric(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.trunc() as i64)
}

fn clamp_int(
    raw: &Map<String, Value>,
    field: &str,
    min: i64,
    max: i64,
    fallback: i64,
    issues: &mut Vec<ConfigIssue>,
) -> i64 {
    let requested = match raw.get(field) {
        None | Some(Value::Null) => fallback,
        Some(value) => match numeric(value) {
            Some(n) => n,
            None => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::NotANumber {
                        field: field.to_string(),
                    },
                    format!(
                        "{}: '{}' is not a number, using default {}",
                        field,
                        display_value(value),
                        fallback
                    ),
                ));
                fallback
            }
        },
    };

    // The fallback is clamped too so a small team never inherits a larger
    // default threshold.
    let applied = requested.clamp(min, max);
    if applied != requested && raw.get(field).is_some_and(|v| !v.is_null()) {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::Clamped {
                field: field.to_string(),
                requested,
                applied,
            },
            format!("{field}: {requested} is outside [{min}, {max}], using {applied}"),
        ));
    }
    applied
}

/// Truthiness of a raw flag; absent or null keeps the default.
fn read_flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn read_model(
    raw: &Map<String, Value>,
    field: &str,
    default: String,
    issues: &mut Vec<ConfigIssue>,
) -> String {
    let model = match raw.get(field) {
        None | Some(Value::Null) => default,
        Some(value) => display_value(value),
    };
    if model.trim().is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::EmptyModelName {
                field: field.to_string(),
            },
            format!("{field}: model name cannot be empty"),
        ));
    }
    model
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::validation::{Severity, has_errors};
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(read_settings(None), BraintrustSettings::default());
        assert_eq!(read_settings(Some(&Map::new())), BraintrustSettings::default());

        let defaults = BraintrustSettings::default();
        assert!(!defaults.enabled);
        assert_eq!(defaults.team_size, 3);
        assert_eq!(defaults.strategy, Strategy::Panel);
        assert_eq!(defaults.timeout_seconds, 90);
        assert_eq!(defaults.quorum(), QuorumConfig::new(2, 2));
    }

    #[test]
    fn test_clamps_quorum_values_to_team_size() {
        let got = read_settings(Some(&raw(json!({
            "teamSize": 2,
            "minParticipatingAgents": 9,
            "minAnsweringAgents": 7
        }))));
        assert_eq!(got.team_size, 2);
        assert_eq!(got.min_participating_agents, 2);
        assert_eq!(got.min_answering_agents, 2);
    }

    #[test]
    fn test_clamps_in_dependency_order() {
        let got = read_settings(Some(&raw(json!({
            "teamSize": 9,
            "minParticipatingAgents": 1,
            "minAnsweringAgents": 4
        }))));
        assert_eq!(got.team_size, 4);
        assert_eq!(got.min_participating_agents, 1);
        // Clamped against the participating threshold, not the team size.
        assert_eq!(got.min_answering_agents, 1);
    }

    #[test]
    fn test_small_team_clamps_default_thresholds() {
        let got = read_settings(Some(&raw(json!({ "teamSize": 1 }))));
        assert_eq!(got.team_size, 1);
        assert_eq!(got.min_participating_agents, 1);
        assert_eq!(got.min_answering_agents, 1);
    }

    #[test]
    fn test_numeric_coercion() {
        let got = read_settings(Some(&raw(json!({
            "teamSize": "2",
            "timeoutSeconds": 45.9,
            "minParticipatingAgents": "many"
        }))));
        assert_eq!(got.team_size, 2);
        assert_eq!(got.timeout_seconds, 45);
        assert_eq!(got.min_participating_agents, 2);
    }

    #[test]
    fn test_timeout_range() {
        let low = read_settings(Some(&raw(json!({ "timeoutSeconds": 1 }))));
        assert_eq!(low.timeout_seconds, MIN_TIMEOUT_SECONDS);
        let high = read_settings(Some(&raw(json!({ "timeoutSeconds": 3600 }))));
        assert_eq!(high.timeout_seconds, MAX_TIMEOUT_SECONDS);
        assert_eq!(high.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_accepts_strategy_overrides() {
        let got = read_settings(Some(&raw(json!({ "strategy": "debate", "enabled": true }))));
        assert_eq!(got.strategy, Strategy::Debate);
        assert!(got.enabled);
    }

    #[test]
    fn test_unknown_strategy_falls_back_with_issue() {
        let (got, issues) = read_settings_with_issues(Some(&raw(json!({ "strategy": "vote" }))));
        assert_eq!(got.strategy, Strategy::Panel);
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "strategy"
        )));
        assert!(!has_errors(&issues));
    }

    #[test]
    fn test_model_overrides_and_empty_model_error() {
        let (got, issues) = read_settings_with_issues(Some(&raw(json!({
            "model": "m-solver",
            "researcherModel": "m-research",
            "synthModel": ""
        }))));
        assert_eq!(got.model, "m-solver");
        assert_eq!(got.researcher_model, "m-research");
        assert_eq!(got.critic_model, BraintrustSettings::default().critic_model);
        assert!(issues.iter().any(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_clamp_reports_issue() {
        let (_, issues) = read_settings_with_issues(Some(&raw(json!({ "teamSize": 7 }))));
        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::Clamped {
                field: "teamSize".to_string(),
                requested: 7,
                applied: 4,
            }));
    }

    #[test]
    fn test_enabled_truthiness() {
        assert!(read_settings(Some(&raw(json!({ "enabled": 1 })))).enabled);
        assert!(!read_settings(Some(&raw(json!({ "enabled": "" })))).enabled);
        assert!(!read_settings(Some(&raw(json!({ "enabled": null })))).enabled);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(BraintrustSettings::default()).unwrap();
        assert_eq!(json["teamSize"], 3);
        assert_eq!(json["synthModel"], "gemini-3.1-pro-preview");
        assert_eq!(json["minAnsweringAgents"], 2);
    }
}
