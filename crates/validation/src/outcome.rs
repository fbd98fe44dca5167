//! Validation results.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Field name used when the payload could not be validated at all.
pub const GENERAL_FIELD: &str = "general";

/// Message used when the payload could not be validated at all.
pub const GENERAL_MESSAGE: &str = "Validation failed";

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Dotted path of the field (`parent.child`).
    pub field: String,
    /// Custom or default message.
    pub message: String,
    /// The value that was checked; `None` when the field was absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldViolation {
    /// Create a violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of running a payload through a shape.
///
/// `is_valid` is derived from `errors` at construction and cannot disagree
/// with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    is_valid: bool,
    errors: Vec<FieldViolation>,
    value: Value,
}

impl ValidationOutcome {
    /// Build an outcome from the collected violations and the coerced value.
    #[must_use]
    pub fn from_parts(errors: Vec<FieldViolation>, value: Value) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            value,
        }
    }

    /// Single synthetic failure echoing the original payload.
    #[must_use]
    pub fn general_failure(original: Value) -> Self {
        let violation = FieldViolation::new(GENERAL_FIELD, GENERAL_MESSAGE, Some(original.clone()));
        Self::from_parts(vec![violation], original)
    }

    /// Whether no constraint failed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Violations in field then constraint declaration order.
    #[must_use]
    pub fn errors(&self) -> &[FieldViolation] {
        &self.errors
    }

    /// Coerced payload (or the original payload for general failures).
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the outcome, returning the coerced payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// `"field: message"` strings in outcome order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
