//! Panel strategy value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How the panel is described to the host model
///
/// All strategies dispatch the same independent scouts; the value is
/// carried through to status lines and the policy-only prompt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Scouts answer in isolation
    Independent,
    /// Scouts are framed as debating each other
    Debate,
    /// Scouts form a panel whose answers are merged (default)
    #[default]
    Panel,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Independent => "independent",
            Strategy::Debate => "debate",
            Strategy::Panel => "panel",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = DomainError;

    /// Strategy names are matched exactly, as the host config schema does.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "independent" => Ok(Strategy::Independent),
            "debate" => Ok(Strategy::Debate),
            "panel" => Ok(Strategy::Panel),
            other => Err(DomainError::UnknownStrategy(other.to_string())),
        }
    }
}
