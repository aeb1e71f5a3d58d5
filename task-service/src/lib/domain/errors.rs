use std::fmt;

use thiserror::Error;

/// A single rejected field and the client-facing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field violation found while validating one input.
///
/// Displays as the violation messages joined by `", "`, which is also what
/// clients receive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl fmt::Display) {
        self.violations
            .push(FieldViolation::new(field, message.to_string()));
    }

    /// Record the error of `result` against `field` and pass the value through.
    ///
    /// Lets callers validate every field before bailing out, so all problems
    /// are reported at once.
    pub fn check<T, E: fmt::Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e);
                None
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Failure categories the persistence layer may report.
///
/// "Not found" is never an error here: lookups return `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    #[error("Duplicate value for unique field: {field}")]
    DuplicateKey { field: String },

    #[error("Rejected by store validation: {0}")]
    Validation(ValidationError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
