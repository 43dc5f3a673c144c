//! Round domain: the result surface of one dispatch round.

pub mod result;

pub use result::{CandidateTelemetry, RoundTelemetry, RuntimeBridgeResult};
