//! Quorum policy domain
//!
//! A dispatch round must clear two thresholds before synthesis is attempted:
//!
//! ```text
//! candidates ──► participating >= min_participating ? ──no──► notice
//!                         │ yes
//!                         ▼
//!                answering >= min_answering ? ──no──────────► notice
//!                         │ yes
//!                         ▼
//!                     synthesis
//! ```
//!
//! Participating candidates answered or refused; answering candidates
//! returned status `ok`.

pub mod config;
pub mod evaluation;
pub mod notice;

pub use config::QuorumConfig;
pub use evaluation::{QuorumEvaluation, evaluate_quorum};
pub use notice::{
    INSUFFICIENT_QUORUM_REASON, NO_USABLE_CANDIDATE_REASON, build_unavailable_notice,
    unavailable_notice,
};
