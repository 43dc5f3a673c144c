//! Logging infrastructure: structured round logging.
//!
//! Provides [`JsonlRoundLogger`], a JSONL file writer that implements
//! the [`RoundLogger`](braintrust_application::RoundLogger) port.

mod round_logger;

pub use round_logger::JsonlRoundLogger;
