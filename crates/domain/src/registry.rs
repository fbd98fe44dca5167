//! Lookup of the request shapes by name.

use crate::auth::{create_auth_shape, login_shape, update_auth_shape};
use crate::product::{create_product_shape, update_product_shape};
use storefront_validation::{ShapeDescriptor, ShapeError};

type ShapeFn = fn() -> Result<&'static ShapeDescriptor, ShapeError>;

const SHAPES: [(&str, ShapeFn); 5] = [
    ("create-auth", create_auth_shape),
    ("update-auth", update_auth_shape),
    ("login", login_shape),
    ("create-product", create_product_shape),
    ("update-product", update_product_shape),
];

/// Names of every request shape, in registration order.
#[must_use]
pub fn shape_names() -> Vec<&'static str> {
    SHAPES.iter().map(|(name, _)| *name).collect()
}

/// Resolve a request shape by name; `None` when the name is unknown.
#[must_use]
pub fn find_shape(name: &str) -> Option<Result<&'static ShapeDescriptor, ShapeError>> {
    SHAPES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, shape)| shape())
}

/// Every request shape, in registration order.
pub fn all_shapes() -> Result<Vec<&'static ShapeDescriptor>, ShapeError> {
    SHAPES.iter().map(|(_, shape)| shape()).collect()
}
