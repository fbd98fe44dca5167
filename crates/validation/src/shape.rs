//! Shape descriptors: ordered field declarations with their constraints.

use crate::constraint::{Constraint, ConstraintKind, ConstraintSummary};
use serde::Serialize;
use std::collections::HashSet;
use storefront_shared::{ErrorCode, ErrorEnvelope};
use thiserror::Error;

/// Reasons a descriptor is rejected when it is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// The descriptor declares no fields.
    #[error("shape `{shape}` declares no fields")]
    Empty {
        /// Descriptor name.
        shape: Box<str>,
    },
    /// A field name is empty or contains the path separator.
    #[error("shape `{shape}` has invalid field name `{field}`")]
    InvalidFieldName {
        /// Descriptor name.
        shape: Box<str>,
        /// Offending field name.
        field: Box<str>,
    },
    /// The same field is declared twice.
    #[error("shape `{shape}` declares field `{field}` more than once")]
    DuplicateField {
        /// Descriptor name.
        shape: Box<str>,
        /// Offending field name.
        field: Box<str>,
    },
    /// Lower bound exceeds upper bound, or a bound is not finite.
    #[error("field `{field}` in shape `{shape}` has unsatisfiable bounds: {detail}")]
    InvalidBounds {
        /// Descriptor name.
        shape: Box<str>,
        /// Offending field name.
        field: Box<str>,
        /// Which bounds conflict.
        detail: Box<str>,
    },
}

impl ShapeError {
    /// Name of the descriptor that failed to build.
    #[must_use]
    pub fn shape(&self) -> &str {
        match self {
            Self::Empty { shape }
            | Self::InvalidFieldName { shape, .. }
            | Self::DuplicateField { shape, .. }
            | Self::InvalidBounds { shape, .. } => shape,
        }
    }
}

/// A malformed descriptor is a programming error, never bad input.
impl From<ShapeError> for ErrorEnvelope {
    fn from(error: ShapeError) -> Self {
        Self::invariant(ErrorCode::new("validation", "invalid_shape"), error.to_string())
            .with_metadata("shape", error.shape())
    }
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: Box<str>,
    constraints: Vec<Constraint>,
    children: Option<ShapeDescriptor>,
}

impl FieldSpec {
    /// Field name (one path segment).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constraints in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Child descriptor for nested objects.
    #[must_use]
    pub const fn children(&self) -> Option<&ShapeDescriptor> {
        self.children.as_ref()
    }

    /// True when a missing value skips the field.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.constraints.iter().any(Constraint::is_optional_marker)
    }
}

/// Static declaration of a request object's fields.
#[derive(Debug, Clone)]
pub struct ShapeDescriptor {
    name: Box<str>,
    fields: Vec<FieldSpec>,
}

impl ShapeDescriptor {
    /// Start declaring a descriptor.
    pub fn builder(name: impl Into<Box<str>>) -> ShapeBuilder {
        ShapeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Descriptor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Serializable view for schema listings.
    #[must_use]
    pub fn summary(&self) -> ShapeSummary {
        ShapeSummary {
            name: self.name.to_string(),
            fields: self
                .fields
                .iter()
                .map(|field| FieldSummary {
                    name: field.name.to_string(),
                    optional: field.is_optional(),
                    constraints: field.constraints.iter().map(Constraint::summary).collect(),
                    children: field.children.as_ref().map(Self::summary),
                })
                .collect(),
        }
    }
}

/// Serializable description of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSummary {
    /// Descriptor name.
    pub name: String,
    /// Field descriptions in declaration order.
    pub fields: Vec<FieldSummary>,
}

/// Serializable description of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    /// Field name.
    pub name: String,
    /// Whether a missing value is accepted.
    pub optional: bool,
    /// Constraint descriptions in declaration order.
    pub constraints: Vec<ConstraintSummary>,
    /// Nested descriptor, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<ShapeSummary>,
}

/// Builder for [`ShapeDescriptor`].
#[derive(Debug)]
#[must_use]
pub struct ShapeBuilder {
    name: Box<str>,
    fields: Vec<FieldSpec>,
}

impl ShapeBuilder {
    /// Declare a scalar field.
    pub fn field(
        mut self,
        name: impl Into<Box<str>>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            constraints: constraints.into_iter().collect(),
            children: None,
        });
        self
    }

    /// Declare a nested object field validated against `children`.
    pub fn nested(
        mut self,
        name: impl Into<Box<str>>,
        constraints: impl IntoIterator<Item = Constraint>,
        children: ShapeDescriptor,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            constraints: constraints.into_iter().collect(),
            children: Some(children),
        });
        self
    }

    /// Check the declarations and produce the descriptor.
    pub fn build(self) -> Result<ShapeDescriptor, ShapeError> {
        if self.fields.is_empty() {
            return Err(ShapeError::Empty { shape: self.name });
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() || field.name.contains('.') {
                return Err(ShapeError::InvalidFieldName {
                    shape: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_ref()) {
                return Err(ShapeError::DuplicateField {
                    shape: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            check_field(&self.name, field)?;
        }

        Ok(ShapeDescriptor {
            name: self.name,
            fields: self.fields,
        })
    }
}

fn check_field(shape: &str, field: &FieldSpec) -> Result<(), ShapeError> {
    let mut min_length: Option<usize> = None;
    let mut max_length: Option<usize> = None;
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    for constraint in &field.constraints {
        match constraint.kind() {
            ConstraintKind::MinLength(value) => min_length = Some(*value),
            ConstraintKind::MaxLength(value) => max_length = Some(*value),
            ConstraintKind::Min(value) | ConstraintKind::Max(value) if !value.is_finite() => {
                return Err(bounds_error(shape, field, "numeric bound is not finite"));
            },
            ConstraintKind::Min(value) => min = Some(*value),
            ConstraintKind::Max(value) => max = Some(*value),
            ConstraintKind::Required
            | ConstraintKind::Optional
            | ConstraintKind::String
            | ConstraintKind::Number
            | ConstraintKind::Email
            | ConstraintKind::Custom { .. } => {},
        }
    }

    if let (Some(lower), Some(upper)) = (min_length, max_length) {
        if lower > upper {
            return Err(bounds_error(shape, field, "min_length exceeds max_length"));
        }
    }
    if let (Some(lower), Some(upper)) = (min, max) {
        if lower > upper {
            return Err(bounds_error(shape, field, "min exceeds max"));
        }
    }
    Ok(())
}

fn bounds_error(shape: &str, field: &FieldSpec, detail: &str) -> ShapeError {
    ShapeError::InvalidBounds {
        shape: shape.into(),
        field: field.name.clone(),
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Result<ShapeDescriptor, ShapeError> {
        ShapeDescriptor::builder("product")
            .field("title", [Constraint::required(), Constraint::string()])
            .field(
                "discount",
                [Constraint::optional(), Constraint::min(0.0), Constraint::max(100.0)],
            )
            .build()
    }

    #[test]
    fn builds_descriptor_in_declaration_order() -> Result<(), ShapeError> {
        let shape = product()?;
        let names: Vec<&str> = shape.fields().iter().map(FieldSpec::name).collect();
        assert_eq!(names, ["title", "discount"]);
        assert!(!shape.fields()[0].is_optional());
        assert!(shape.field("discount").is_some_and(FieldSpec::is_optional));
        Ok(())
    }

    #[test]
    fn rejects_duplicate_and_dotted_names() {
        let duplicate = ShapeDescriptor::builder("dup")
            .field("title", [Constraint::string()])
            .field("title", [Constraint::required()])
            .build();
        assert!(matches!(duplicate, Err(ShapeError::DuplicateField { .. })));

        let dotted = ShapeDescriptor::builder("dotted")
            .field("a.b", [Constraint::string()])
            .build();
        assert!(matches!(dotted, Err(ShapeError::InvalidFieldName { .. })));

        let empty = ShapeDescriptor::builder("empty").build();
        assert!(matches!(empty, Err(ShapeError::Empty { .. })));
    }

    #[test]
    fn optional_field_may_require_non_empty_values() -> Result<(), ShapeError> {
        let shape = ShapeDescriptor::builder("rename")
            .field("name", [Constraint::optional(), Constraint::required()])
            .build()?;
        assert!(shape.field("name").is_some_and(FieldSpec::is_optional));
        Ok(())
    }

    #[test]
    fn build_errors_become_invariant_envelopes() {
        let Err(error) = ShapeDescriptor::builder("empty").build() else {
            panic!("a shape without fields must not build");
        };
        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.kind, storefront_shared::ErrorKind::Invariant);
        assert_eq!(envelope.code, ErrorCode::new("validation", "invalid_shape"));
        assert_eq!(envelope.message, "shape `empty` declares no fields");
        assert_eq!(envelope.metadata.get("shape").map(String::as_str), Some("empty"));
    }

    #[test]
    fn rejects_conflicting_bounds() {
        let lengths = ShapeDescriptor::builder("lengths")
            .field("name", [Constraint::min_length(10), Constraint::max_length(2)])
            .build();
        assert!(matches!(lengths, Err(ShapeError::InvalidBounds { .. })));

        let infinite = ShapeDescriptor::builder("infinite")
            .field("price", [Constraint::max(f64::INFINITY)])
            .build();
        assert!(matches!(infinite, Err(ShapeError::InvalidBounds { .. })));
    }

    #[test]
    fn summary_lists_bounds_and_messages() -> Result<(), ShapeError> {
        let shape = product()?;
        let summary = shape.summary();
        let discount = &summary.fields[1];
        assert!(discount.optional);
        assert_eq!(discount.constraints[2].kind, "max");
        assert_eq!(discount.constraints[2].bound, Some(serde_json::json!(100.0)));
        Ok(())
    }
}
