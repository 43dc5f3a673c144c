//! Settings domain: validated Braintrust configuration.
//!
//! - [`BraintrustSettings`]: the validated settings object consumed by a round
//! - [`read_settings`]: raw host config → settings, with the clamping contract
//! - [`Strategy`]: panel strategy value object
//! - [`validation`]: issues reported while reading raw settings

pub mod reader;
pub mod strategy;
pub mod validation;

pub use reader::{
    BraintrustSettings, MAX_TEAM_SIZE, MAX_TIMEOUT_SECONDS, MIN_TEAM_SIZE, MIN_TIMEOUT_SECONDS,
    read_settings, read_settings_with_issues,
};
pub use strategy::Strategy;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
