//! Quorum thresholds

use serde::{Deserialize, Serialize};

/// Minimum participation and answering thresholds for a round
///
/// Invariant (established by the settings reader):
/// `1 <= min_answering_agents <= min_participating_agents <= team_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuorumConfig {
    pub min_participating_agents: usize,
    pub min_answering_agents: usize,
}

impl QuorumConfig {
    pub fn new(min_participating_agents: usize, min_answering_agents: usize) -> Self {
        Self {
            min_participating_agents,
            min_answering_agents,
        }
    }
}

impl Default for QuorumConfig {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

impl std::fmt::Display for QuorumConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}",
            self.min_participating_agents, self.min_answering_agents
        )
    }
}
