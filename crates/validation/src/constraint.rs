//! Field constraints and their default messages.

use crate::email::is_valid_email;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// Predicate used by custom constraints.
pub type CustomCheck = fn(&Value) -> bool;

/// The rule a constraint enforces.
#[derive(Debug, Clone)]
pub enum ConstraintKind {
    /// Fails when the value is missing, `null`, or an empty string.
    ///
    /// Listed after `Optional`, it only sees present values.
    Required,
    /// Marks the field optional: a missing or `null` value skips the field.
    Optional,
    /// Fails unless the value is a JSON string.
    String,
    /// Fails unless the value is a JSON number.
    Number,
    /// Fails unless the value is a string shaped like an email address.
    Email,
    /// Inclusive lower bound on string length (characters).
    MinLength(usize),
    /// Inclusive upper bound on string length (characters).
    MaxLength(usize),
    /// Inclusive lower numeric bound.
    Min(f64),
    /// Inclusive upper numeric bound.
    Max(f64),
    /// Named predicate over the raw value (`null` when missing).
    Custom {
        /// Stable name reported by shape summaries.
        name: &'static str,
        /// Returns true when the value satisfies the rule.
        check: CustomCheck,
    },
}

impl ConstraintKind {
    /// Stable identifier for this kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::String => "string",
            Self::Number => "number",
            Self::Email => "email",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Custom { name, .. } => *name,
        }
    }
}

/// A single declarative rule attached to a field.
#[derive(Debug, Clone)]
pub struct Constraint {
    kind: ConstraintKind,
    message: Option<Cow<'static, str>>,
}

impl Constraint {
    const fn of(kind: ConstraintKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Value must be present and not `null` or `""`.
    #[must_use]
    pub const fn required() -> Self {
        Self::of(ConstraintKind::Required)
    }

    /// Missing or `null` values skip every other rule on the field.
    #[must_use]
    pub const fn optional() -> Self {
        Self::of(ConstraintKind::Optional)
    }

    /// Value must be a string.
    #[must_use]
    pub const fn string() -> Self {
        Self::of(ConstraintKind::String)
    }

    /// Value must be a number.
    #[must_use]
    pub const fn number() -> Self {
        Self::of(ConstraintKind::Number)
    }

    /// Value must be a well-formed email address.
    #[must_use]
    pub const fn email() -> Self {
        Self::of(ConstraintKind::Email)
    }

    /// String must have at least `min` characters.
    #[must_use]
    pub const fn min_length(min: usize) -> Self {
        Self::of(ConstraintKind::MinLength(min))
    }

    /// String must have at most `max` characters.
    #[must_use]
    pub const fn max_length(max: usize) -> Self {
        Self::of(ConstraintKind::MaxLength(max))
    }

    /// Number must be greater than or equal to `min`.
    #[must_use]
    pub const fn min(min: f64) -> Self {
        Self::of(ConstraintKind::Min(min))
    }

    /// Number must be less than or equal to `max`.
    #[must_use]
    pub const fn max(max: f64) -> Self {
        Self::of(ConstraintKind::Max(max))
    }

    /// Custom named predicate.
    #[must_use]
    pub const fn custom(name: &'static str, check: CustomCheck) -> Self {
        Self::of(ConstraintKind::Custom { name, check })
    }

    /// Replace the default message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The rule this constraint enforces.
    #[must_use]
    pub const fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// The configured message, if any.
    #[must_use]
    pub fn custom_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) const fn is_optional_marker(&self) -> bool {
        matches!(self.kind, ConstraintKind::Optional)
    }

    /// Evaluate against a field value; `None` means the field was absent.
    #[must_use]
    pub fn is_satisfied_by(&self, value: Option<&Value>) -> bool {
        match &self.kind {
            ConstraintKind::Required => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(text)) => !text.is_empty(),
                Some(_) => true,
            },
            ConstraintKind::Optional => true,
            ConstraintKind::String => matches!(value, Some(Value::String(_))),
            ConstraintKind::Number => matches!(value, Some(Value::Number(_))),
            ConstraintKind::Email => {
                matches!(value, Some(Value::String(text)) if is_valid_email(text))
            },
            ConstraintKind::MinLength(min) => {
                string_length(value).is_some_and(|length| length >= *min)
            },
            ConstraintKind::MaxLength(max) => {
                string_length(value).is_some_and(|length| length <= *max)
            },
            ConstraintKind::Min(min) => number(value).is_some_and(|number| number >= *min),
            ConstraintKind::Max(max) => number(value).is_some_and(|number| number <= *max),
            ConstraintKind::Custom { check, .. } => {
                value.map_or_else(|| check(&Value::Null), |present| check(present))
            },
        }
    }

    /// Message reported for `property` when this constraint fails.
    #[must_use]
    pub fn message_for(&self, property: &str) -> String {
        if let Some(message) = self.message.as_deref() {
            return message.to_owned();
        }
        match &self.kind {
            ConstraintKind::Required => format!("{property} should not be empty"),
            ConstraintKind::Optional => format!("{property} is optional"),
            ConstraintKind::String => format!("{property} must be a string"),
            ConstraintKind::Number => {
                format!("{property} must be a number conforming to the specified constraints")
            },
            ConstraintKind::Email => format!("{property} must be an email"),
            ConstraintKind::MinLength(min) => {
                format!("{property} must be longer than or equal to {min} characters")
            },
            ConstraintKind::MaxLength(max) => {
                format!("{property} must be shorter than or equal to {max} characters")
            },
            ConstraintKind::Min(min) => {
                format!("{property} must not be less than {}", format_bound(*min))
            },
            ConstraintKind::Max(max) => {
                format!("{property} must not be greater than {}", format_bound(*max))
            },
            ConstraintKind::Custom { .. } => format!("{property} is invalid"),
        }
    }

    /// Serializable view of this constraint.
    #[must_use]
    pub fn summary(&self) -> ConstraintSummary {
        let bound = match self.kind {
            ConstraintKind::MinLength(value) | ConstraintKind::MaxLength(value) => {
                Some(Value::from(value))
            },
            ConstraintKind::Min(value) | ConstraintKind::Max(value) => {
                serde_json::Number::from_f64(value).map(Value::Number)
            },
            _ => None,
        };
        ConstraintSummary {
            kind: self.kind.name(),
            bound,
            message: self.message.as_deref().map(str::to_owned),
        }
    }
}

/// Serializable description of a constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintSummary {
    /// Constraint kind identifier.
    pub kind: &'static str,
    /// Bound for length and numeric rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound: Option<Value>,
    /// Custom message, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn string_length(value: Option<&Value>) -> Option<usize> {
    match value {
        Some(Value::String(text)) => Some(text.chars().count()),
        _ => None,
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(number)) => number.as_f64(),
        _ => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "integral bounds below 2^53 are rendered without a fraction"
)]
fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < 9_007_199_254_740_992.0 {
        format!("{}", bound as i64)
    } else {
        format!("{bound}")
    }
}
