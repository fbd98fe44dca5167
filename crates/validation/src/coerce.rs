//! Plain payload to declared-shape coercion.

use crate::shape::ShapeDescriptor;
use serde_json::{Map, Value};
use thiserror::Error;

/// Payload could not be turned into an instance of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The payload is not a JSON object.
    #[error("expected an object for shape `{shape}`, found {found}")]
    NotAnObject {
        /// Target descriptor name.
        shape: Box<str>,
        /// JSON type that was supplied.
        found: &'static str,
    },
}

/// Copy the declared fields of `input` into a fresh object.
///
/// Unknown keys are dropped. `null` coerces to an empty object. Nested
/// objects are coerced against their child descriptor; nested values of any
/// other type are copied unchanged so the field constraints can report them.
pub(crate) fn coerce(
    shape: &ShapeDescriptor,
    input: &Value,
) -> Result<Map<String, Value>, CoercionError> {
    let source = match input {
        Value::Object(map) => map,
        Value::Null => return Ok(Map::new()),
        other => {
            return Err(CoercionError::NotAnObject {
                shape: shape.name().into(),
                found: json_type(other),
            });
        },
    };

    let mut coerced = Map::new();
    for field in shape.fields() {
        let Some(value) = source.get(field.name()) else {
            continue;
        };
        let value = match (field.children(), value) {
            (Some(children), Value::Object(_)) => Value::Object(coerce(children, value)?),
            _ => value.clone(),
        };
        coerced.insert(field.name().to_owned(), value);
    }
    Ok(coerced)
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::shape::ShapeError;
    use serde_json::json;

    fn shape() -> Result<ShapeDescriptor, ShapeError> {
        let address = ShapeDescriptor::builder("address")
            .field("city", [Constraint::string()])
            .build()?;
        ShapeDescriptor::builder("profile")
            .field("name", [Constraint::string()])
            .nested("address", [], address)
            .build()
    }

    #[test]
    fn drops_unknown_keys_recursively() -> Result<(), ShapeError> {
        let shape = shape()?;
        let coerced = coerce(
            &shape,
            &json!({
                "name": "ada",
                "role": "admin",
                "address": { "city": "paris", "zip": "75001" }
            }),
        );
        assert_eq!(
            coerced.map(Value::Object),
            Ok(json!({ "name": "ada", "address": { "city": "paris" } }))
        );
        Ok(())
    }

    #[test]
    fn null_becomes_empty_object() -> Result<(), ShapeError> {
        assert_eq!(coerce(&shape()?, &Value::Null), Ok(Map::new()));
        Ok(())
    }

    #[test]
    fn arrays_and_scalars_are_rejected() -> Result<(), ShapeError> {
        let shape = shape()?;
        assert_eq!(
            coerce(&shape, &json!([1, 2])),
            Err(CoercionError::NotAnObject {
                shape: "profile".into(),
                found: "array",
            })
        );
        assert!(coerce(&shape, &json!("text")).is_err());
        Ok(())
    }

    #[test]
    fn nested_non_objects_are_kept_for_reporting() -> Result<(), ShapeError> {
        let coerced = coerce(&shape()?, &json!({ "address": 5 }));
        assert_eq!(coerced.map(Value::Object), Ok(json!({ "address": 5 })));
        Ok(())
    }
}
