//! Error types for constructing and validating activity records.

use std::fmt;

/// A single problem found while validating an otherwise well-formed record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `images[2].width`
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised while building an `ActivityDetails` from raw input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActivityError {
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },

    #[error("field `{field}` has wrong type: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}` out of range: {message}")]
    OutOfRangeValue { field: String, message: String },

    #[error("record failed validation: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for ActivityError {
    fn from(err: serde_json::Error) -> Self {
        ActivityError::InvalidJson(err.to_string())
    }
}

impl ActivityError {
    /// Path of the field that caused the error. For validation failures this
    /// is the first reported issue.
    pub fn field(&self) -> Option<&str> {
        match self {
            ActivityError::MissingRequiredField { field }
            | ActivityError::TypeMismatch { field, .. }
            | ActivityError::OutOfRangeValue { field, .. } => Some(field),
            ActivityError::Validation(issues) => issues.first().map(|i| i.field.as_str()),
            ActivityError::InvalidJson(_) => None,
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for model operations
pub type Result<T> = std::result::Result<T, ActivityError>;
