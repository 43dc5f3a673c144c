//! Synthesis domain: turning usable candidates into one final answer.
//!
//! - [`synthesize_deterministic`]: concise-bias winner, no model call
//! - [`PromptTemplate`]: scout system prompt and the judge merge prompt
//! - [`SynthesisOutput`]: final text plus provenance
//!
//! The judge path itself needs an external capability and lives in the
//! application layer.

pub mod deterministic;
pub mod output;
pub mod prompt;

pub use deterministic::{synthesize_deterministic, usable_candidates};
pub use output::SynthesisOutput;
pub use prompt::PromptTemplate;
