//! Structured issues detected while reading raw settings.
//!
//! The settings reader never fails: every bad value falls back or is
//! clamped. Issues record what was adjusted so config front-ends can warn.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a value was replaced or adjusted.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model identifier is empty.
    EmptyModelName { field: String },
    /// An enum field had an unknown value and fell back to the default.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field was not a number and fell back to the default.
    NotANumber { field: String },
    /// A value the selected mode depends on is missing or empty.
    MissingValue { field: String },
    /// A numeric field was outside its range and was clamped.
    Clamped {
        field: String,
        requested: i64,
        applied: i64,
    },
    /// More participants are required than scouts are ever dispatched.
    UnreachableQuorum { required: usize, scouts: usize },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }
}

/// Check whether any issues are errors (i.e. fatal).
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
