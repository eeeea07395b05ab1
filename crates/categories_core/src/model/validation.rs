//! Schema check for untrusted category input.
//!
//! # Responsibility
//! - Turn an arbitrary JSON value into a typed `CategoryToCreate`, or a list
//!   of field-level issues.
//!
//! # Invariants
//! - Validation never panics and never returns `Err`; failures are data.
//! - Unknown keys are ignored.

use crate::model::category::{validate_title, CategoryToCreate, CategoryValidationError};
use serde::Serialize;
use serde_json::Value;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted field path; empty for the root value.
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl From<CategoryValidationError> for FieldIssue {
    fn from(value: CategoryValidationError) -> Self {
        Self::new("title", value.to_string())
    }
}

/// Outcome of `validate_category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidation {
    Valid(CategoryToCreate),
    Invalid(Vec<FieldIssue>),
}

impl CategoryValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Converts into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<CategoryToCreate, Vec<FieldIssue>> {
        match self {
            Self::Valid(input) => Ok(input),
            Self::Invalid(issues) => Err(issues),
        }
    }
}

/// Checks an untrusted value against the `CategoryToCreate` shape.
pub fn validate_category(value: &Value) -> CategoryValidation {
    let Some(object) = value.as_object() else {
        return CategoryValidation::Invalid(vec![FieldIssue::new(
            "",
            format!("expected object, received {}", kind_name(value)),
        )]);
    };

    let title = match object.get("title") {
        None => return CategoryValidation::Invalid(vec![FieldIssue::new("title", "required")]),
        Some(Value::String(title)) => title,
        Some(other) => {
            return CategoryValidation::Invalid(vec![FieldIssue::new(
                "title",
                format!("expected string, received {}", kind_name(other)),
            )]);
        }
    };

    match validate_title(title) {
        Ok(()) => CategoryValidation::Valid(CategoryToCreate {
            title: title.clone(),
        }),
        Err(err) => CategoryValidation::Invalid(vec![err.into()]),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
