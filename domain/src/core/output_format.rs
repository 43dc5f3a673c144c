//! Output format value object

use serde::{Deserialize, Serialize};

/// How a round's result is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every candidate, the quorum verdict and the final answer
    Full,
    /// Only the final text (answer or notice)
    #[default]
    Final,
    /// The result object as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Full => "full",
            OutputFormat::Final => "final",
            OutputFormat::Json => "json",
        }
    }
}
