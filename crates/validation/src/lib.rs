//! # storefront-validation
//!
//! Request payload validation driven by inspectable shape descriptors.
//!
//! A [`ShapeDescriptor`] is an ordered list of fields, each carrying an
//! ordered list of [`Constraint`]s and optionally a child descriptor for
//! nested objects. [`validate`] coerces a plain JSON payload into the declared
//! shape, evaluates every constraint, and returns a [`ValidationOutcome`]
//! whose errors are flattened into dotted field paths.
//!
//! ```
//! use serde_json::json;
//! use storefront_validation::{Constraint, ShapeDescriptor, validate};
//!
//! let shape = ShapeDescriptor::builder("create-product")
//!     .field(
//!         "title",
//!         [Constraint::required().with_message("Title is required"), Constraint::string()],
//!     )
//!     .field("price", [Constraint::required(), Constraint::number(), Constraint::min(0.0)])
//!     .build()?;
//!
//! let outcome = validate(&shape, &json!({ "title": "", "price": 3 }));
//! assert!(!outcome.is_valid());
//! assert_eq!(outcome.messages(), vec!["title: Title is required".to_string()]);
//! # Ok::<(), storefront_validation::ShapeError>(())
//! ```

mod coerce;
mod constraint;
mod email;
mod outcome;
mod pipeline;
mod shape;

pub use coerce::CoercionError;
pub use constraint::{Constraint, ConstraintKind, ConstraintSummary};
pub use email::{EMAIL_MAX_LENGTH, is_valid_email};
pub use outcome::{FieldViolation, GENERAL_FIELD, GENERAL_MESSAGE, ValidationOutcome};
pub use pipeline::{Dto, validate, validate_dto, validate_dto_async};
pub use shape::{FieldSpec, FieldSummary, ShapeBuilder, ShapeDescriptor, ShapeError, ShapeSummary};

/// Returns the validation crate version.
#[must_use]
pub const fn validation_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
