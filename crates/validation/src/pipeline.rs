//! Coerce, check, flatten.

use crate::coerce::coerce;
use crate::outcome::{FieldViolation, ValidationOutcome};
use crate::shape::{ShapeDescriptor, ShapeError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::future::{Ready, ready};
use storefront_shared::Validated;

/// A request DTO backed by a static shape descriptor.
pub trait Dto: DeserializeOwned {
    /// The descriptor payloads are validated against before deserialization.
    ///
    /// # Errors
    /// Returns the build error when the static descriptor is malformed.
    fn shape() -> Result<&'static ShapeDescriptor, ShapeError>;
}

/// Validate `input` against `shape`.
///
/// Never fails: coercion failures are reported as a single `general`
/// violation echoing the original input.
#[must_use]
pub fn validate(shape: &ShapeDescriptor, input: &Value) -> ValidationOutcome {
    let coerced = match coerce(shape, input) {
        Ok(coerced) => coerced,
        Err(error) => {
            tracing::debug!(shape = shape.name(), %error, "payload coercion failed");
            return ValidationOutcome::general_failure(input.clone());
        },
    };

    let mut errors = Vec::new();
    check_fields(shape, &coerced, None, &mut errors);
    tracing::debug!(
        shape = shape.name(),
        violations = errors.len(),
        "payload validated"
    );
    ValidationOutcome::from_parts(errors, Value::Object(coerced))
}

fn check_fields(
    shape: &ShapeDescriptor,
    object: &Map<String, Value>,
    prefix: Option<&str>,
    errors: &mut Vec<FieldViolation>,
) {
    for field in shape.fields() {
        let value = object.get(field.name());
        if field.is_optional() && value.is_none_or(Value::is_null) {
            continue;
        }

        let path = prefix.map_or_else(
            || field.name().to_owned(),
            |prefix| format!("{prefix}.{}", field.name()),
        );
        for constraint in field.constraints() {
            if !constraint.is_satisfied_by(value) {
                errors.push(FieldViolation::new(
                    path.clone(),
                    constraint.message_for(field.name()),
                    value.cloned(),
                ));
            }
        }

        if let (Some(children), Some(Value::Object(nested))) = (field.children(), value) {
            check_fields(children, nested, Some(&path), errors);
        }
    }
}

/// Validate `input` against `T`'s shape and deserialize the coerced value.
///
/// # Errors
/// Returns the failing outcome when a constraint fails. A malformed shape or
/// a coerced value that does not deserialize into `T` is reported as the
/// `general` outcome.
pub fn validate_dto<T: Dto>(input: &Value) -> Result<Validated<T>, ValidationOutcome> {
    let shape = match T::shape() {
        Ok(shape) => shape,
        Err(error) => {
            tracing::error!(%error, "request shape is malformed");
            return Err(ValidationOutcome::general_failure(input.clone()));
        },
    };

    let outcome = validate(shape, input);
    if !outcome.is_valid() {
        return Err(outcome);
    }
    serde_json::from_value::<T>(outcome.into_value())
        .map(Validated::new)
        .map_err(|error| {
            tracing::debug!(shape = shape.name(), %error, "validated payload did not deserialize");
            ValidationOutcome::general_failure(input.clone())
        })
}

/// Future-returning form of [`validate_dto`] for async handlers.
///
/// The work is synchronous; the future is already complete.
pub fn validate_dto_async<T: Dto>(input: Value) -> Ready<Result<Validated<T>, ValidationOutcome>> {
    ready(validate_dto(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::LazyLock;

    static ITEM: LazyLock<Result<ShapeDescriptor, ShapeError>> = LazyLock::new(|| {
        ShapeDescriptor::builder("item")
            .field("label", [Constraint::required(), Constraint::string()])
            .field("count", [Constraint::optional(), Constraint::number(), Constraint::min(1.0)])
            .build()
    });

    #[derive(Debug, Deserialize)]
    struct Item {
        label: String,
        count: Option<u32>,
    }

    impl Dto for Item {
        fn shape() -> Result<&'static ShapeDescriptor, ShapeError> {
            ITEM.as_ref().map_err(ShapeError::clone)
        }
    }

    #[test]
    fn optional_null_skips_every_rule() -> Result<(), ShapeError> {
        let shape = Item::shape()?;
        let outcome = validate(shape, &json!({ "label": "pen", "count": null }));
        assert!(outcome.is_valid());
        Ok(())
    }

    #[test]
    fn missing_required_field_reports_each_failed_rule() -> Result<(), ShapeError> {
        let outcome = validate(Item::shape()?, &json!({}));
        assert_eq!(
            outcome.messages(),
            ["label: label should not be empty", "label: label must be a string"]
        );
        assert_eq!(outcome.errors()[0].value, None);
        Ok(())
    }

    #[test]
    fn optional_required_field_rejects_only_present_empty_values() -> Result<(), ShapeError> {
        let shape = ShapeDescriptor::builder("rename")
            .field(
                "label",
                [Constraint::optional(), Constraint::required(), Constraint::string()],
            )
            .build()?;
        assert!(validate(&shape, &json!({})).is_valid());
        assert!(validate(&shape, &json!({ "label": null })).is_valid());
        assert_eq!(
            validate(&shape, &json!({ "label": "" })).messages(),
            ["label: label should not be empty"]
        );
        Ok(())
    }

    #[test]
    fn typed_entry_point_returns_proof() {
        let item = validate_dto::<Item>(&json!({ "label": "pen", "count": 2, "extra": true }));
        assert!(matches!(item, Ok(ref item) if item.label == "pen" && item.count == Some(2)));
    }

    #[test]
    fn undeserializable_value_becomes_general_failure() {
        let input = json!({ "label": "pen", "count": 1.5 });
        let Err(outcome) = validate_dto::<Item>(&input) else {
            panic!("fractional count should not deserialize into u32");
        };
        assert_eq!(outcome.messages(), ["general: Validation failed"]);
        assert_eq!(outcome.value(), &input);
    }

    #[tokio::test]
    async fn async_entry_point_matches_sync() {
        let outcome = validate_dto_async::<Item>(json!({ "label": "" })).await;
        let Err(outcome) = outcome else {
            panic!("empty label should fail");
        };
        assert_eq!(outcome.messages(), ["label: label should not be empty"]);
    }
}
