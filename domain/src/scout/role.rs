//! Scout roles and the slot lookup table.
//!
//! Team composition is positional: slot 0 is always the solver, slot 1 the
//! critic and slot 2 the researcher. Each slot reads its model from a fixed
//! settings field. Slots past the table are reserved for the judge and are
//! never dispatched as scouts.

use crate::core::error::DomainError;
use crate::settings::BraintrustSettings;
use serde::{Deserialize, Serialize};

/// Role a scout plays in a dispatch round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoutRole {
    /// Answers the prompt directly
    Solver,
    /// Answers with a critical eye on likely mistakes
    Critic,
    /// Answers with emphasis on supporting facts
    Researcher,
}

impl ScoutRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoutRole::Solver => "solver",
            ScoutRole::Critic => "critic",
            ScoutRole::Researcher => "researcher",
        }
    }
}

impl std::fmt::Display for ScoutRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ScoutRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solver" => Ok(ScoutRole::Solver),
            "critic" => Ok(ScoutRole::Critic),
            "researcher" => Ok(ScoutRole::Researcher),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// One entry of the slot table: the role and the settings field its model
/// is read from.
#[derive(Clone, Copy)]
pub struct ScoutSlot {
    pub role: ScoutRole,
    model_of: fn(&BraintrustSettings) -> &str,
}

impl ScoutSlot {
    /// Model assigned to this slot under `settings`.
    pub fn model<'a>(&self, settings: &'a BraintrustSettings) -> &'a str {
        (self.model_of)(settings)
    }
}

impl std::fmt::Debug for ScoutSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoutSlot").field("role", &self.role).finish()
    }
}

/// Slot index → (role, model field). `synth_model` never appears here.
pub const SCOUT_SLOTS: [ScoutSlot; 3] = [
    ScoutSlot {
        role: ScoutRole::Solver,
        model_of: |s| s.model.as_str(),
    },
    ScoutSlot {
        role: ScoutRole::Critic,
        model_of: |s| s.critic_model.as_str(),
    },
    ScoutSlot {
        role: ScoutRole::Researcher,
        model_of: |s| s.researcher_model.as_str(),
    },
];

/// Number of scouts dispatched for a team of `team_size`.
pub fn scout_count(team_size: usize) -> usize {
    team_size.min(SCOUT_SLOTS.len())
}

/// The slots dispatched for a team of `team_size`, in slot order.
pub fn scout_slots(team_size: usize) -> &'static [ScoutSlot] {
    &SCOUT_SLOTS[..scout_count(team_size)]
}

/// Stable candidate id for a zero-based slot index (`agent-1`, `agent-2`, ...).
pub fn slot_id(index: usize) -> String {
    format!("agent-{}", index + 1)
}
