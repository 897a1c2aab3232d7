//! Validation error types
//!
//! A rejected insert payload yields exactly one error kind, [`ValidationError`],
//! carrying every field issue found in declared field order.
//!
//! Error code:
//! - MADRASA_VALIDATION_FAILED (REJECT)

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Stable code reported for every validation failure.
pub const VALIDATION_FAILED: &str = "MADRASA_VALIDATION_FAILED";

/// What is wrong with one field of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Required field absent
    Missing,
    /// Value of the wrong semantic type
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// `null` given for a field that is not nullable
    NullNotAllowed,
    /// Key not declared in the insertable shape
    UnknownField,
    /// String that is not a `YYYY-MM-DD` calendar date
    InvalidDate { value: String },
    /// Integer outside the 32-bit signed range
    OutOfRange { value: String },
    /// Payload itself is not a JSON object
    NotAnObject { actual: &'static str },
    /// Normalized payload did not decode into the typed insert shape
    Undecodable { message: String },
}

impl IssueKind {
    /// Short machine-readable name of the issue
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::Missing => "missing",
            IssueKind::TypeMismatch { .. } => "type_mismatch",
            IssueKind::NullNotAllowed => "null_not_allowed",
            IssueKind::UnknownField => "unknown_field",
            IssueKind::InvalidDate { .. } => "invalid_date",
            IssueKind::OutOfRange { .. } => "out_of_range",
            IssueKind::NotAnObject { .. } => "not_an_object",
            IssueKind::Undecodable { .. } => "undecodable",
        }
    }
}

/// One problem found in a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// External field name (`$root` for the payload itself)
    pub field: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, IssueKind::Missing)
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::new(field, IssueKind::TypeMismatch { expected, actual })
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "field '{}': required field is missing", self.field),
            IssueKind::TypeMismatch { expected, actual } => {
                write!(f, "field '{}': expected {}, got {}", self.field, expected, actual)
            }
            IssueKind::NullNotAllowed => write!(f, "field '{}': null is not allowed", self.field),
            IssueKind::UnknownField => write!(f, "field '{}': not declared", self.field),
            IssueKind::InvalidDate { value } => {
                write!(f, "field '{}': '{}' is not a YYYY-MM-DD date", self.field, value)
            }
            IssueKind::OutOfRange { value } => {
                write!(f, "field '{}': {} is outside the integer range", self.field, value)
            }
            IssueKind::NotAnObject { actual } => {
                write!(f, "payload must be an object, got {}", actual)
            }
            IssueKind::Undecodable { message } => {
                write!(f, "field '{}': {}", self.field, message)
            }
        }
    }
}

/// Insert payload rejected by an entity's declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("[REJECT] MADRASA_VALIDATION_FAILED: {entity} payload rejected: {}", join_issues(.issues))]
pub struct ValidationError {
    entity: &'static str,
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Creates an error. `issues` must not be empty.
    pub fn new(entity: &'static str, issues: Vec<FieldIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { entity, issues }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        VALIDATION_FAILED
    }

    /// Returns the entity whose payload was rejected
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Returns every issue in declared field order
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Returns the field of the first issue
    pub fn field(&self) -> &str {
        self.issues.first().map(|i| i.field.as_str()).unwrap_or("$root")
    }

    /// Returns the names of missing required fields
    pub fn missing_fields(&self) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::Missing)
            .map(|i| i.field.as_str())
            .collect()
    }

    /// Whether any issue concerns `field`
    pub fn concerns(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = FieldIssue::type_mismatch("amount", "real", "text");
        let display = issue.to_string();
        assert!(display.contains("amount"));
        assert!(display.contains("real"));
        assert!(display.contains("text"));
    }

    #[test]
    fn test_error_display_lists_all_issues() {
        let err = ValidationError::new(
            "Fee",
            vec![FieldIssue::missing("dueDate"), FieldIssue::missing("amount")],
        );
        let display = err.to_string();
        assert!(display.starts_with("[REJECT] MADRASA_VALIDATION_FAILED"));
        assert!(display.contains("Fee"));
        assert!(display.contains("dueDate"));
        assert!(display.contains("amount"));
    }

    #[test]
    fn test_missing_fields() {
        let err = ValidationError::new(
            "Fee",
            vec![
                FieldIssue::type_mismatch("amount", "real", "text"),
                FieldIssue::missing("dueDate"),
            ],
        );
        assert_eq!(err.missing_fields(), vec!["dueDate"]);
        assert_eq!(err.field(), "amount");
        assert!(err.concerns("dueDate"));
        assert!(!err.concerns("notes"));
    }

    #[test]
    fn test_issue_serializes_with_kind() {
        let issue = FieldIssue::type_mismatch("examId", "integer", "text");
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["field"], "examId");
        assert_eq!(value["kind"], "type_mismatch");
        assert_eq!(value["expected"], "integer");
        assert_eq!(IssueKind::Missing.code(), "missing");
    }
}
