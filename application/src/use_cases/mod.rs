//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod controller;
pub mod dispatch;
pub mod run_round;
pub mod synthesize;

#[cfg(test)]
pub(crate) mod test_support;
