//! Product shapes, request DTOs, and the stored record.

use crate::primitives::{EpochMillis, PrimitiveError, ProductId, normalize_label};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use storefront_shared::{ErrorCode, ErrorEnvelope, Validated};
use storefront_validation::{Constraint, Dto, ShapeDescriptor, ShapeError};

/// Longest accepted product title, in characters.
pub const TITLE_MAX_LENGTH: usize = 100;
/// Largest accepted discount percentage.
pub const DISCOUNT_MAX: f64 = 100.0;

static CREATE_PRODUCT: LazyLock<Result<ShapeDescriptor, ShapeError>> =
    LazyLock::new(|| product_shape("create-product", false));
static UPDATE_PRODUCT: LazyLock<Result<ShapeDescriptor, ShapeError>> =
    LazyLock::new(|| product_shape("update-product", true));

fn product_shape(name: &str, partial: bool) -> Result<ShapeDescriptor, ShapeError> {
    let title_required = Constraint::required().with_message("Title is required");
    let (title_presence, price_presence) = if partial {
        (
            vec![Constraint::optional(), title_required],
            vec![Constraint::optional()],
        )
    } else {
        (vec![title_required], vec![Constraint::required()])
    };
    ShapeDescriptor::builder(name)
        .field(
            "title",
            title_presence.into_iter().chain([
                Constraint::string(),
                Constraint::max_length(TITLE_MAX_LENGTH),
            ]),
        )
        .field(
            "price",
            price_presence.into_iter().chain([
                Constraint::number(),
                Constraint::min(0.0).with_message("Price must be non-negative"),
            ]),
        )
        .field(
            "discount",
            [
                Constraint::optional(),
                Constraint::number(),
                Constraint::min(0.0),
                Constraint::max(DISCOUNT_MAX),
            ],
        )
        .build()
}

/// Descriptor for product creation payloads.
pub fn create_product_shape() -> Result<&'static ShapeDescriptor, ShapeError> {
    CREATE_PRODUCT.as_ref().map_err(ShapeError::clone)
}

/// Descriptor for product update payloads.
///
/// Every field may be omitted; a title that is present must not be empty.
pub fn update_product_shape() -> Result<&'static ShapeDescriptor, ShapeError> {
    UPDATE_PRODUCT.as_ref().map_err(ShapeError::clone)
}

/// Body of `POST /api/product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreateProductDto {
    /// Display title, 1 to 100 characters.
    pub title: String,
    /// Non-negative price.
    pub price: f64,
    /// Discount percentage, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl Dto for CreateProductDto {
    fn shape() -> Result<&'static ShapeDescriptor, ShapeError> {
        create_product_shape()
    }
}

/// Body of `PUT /api/product/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProductDto {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New discount percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl Dto for UpdateProductDto {
    fn shape() -> Result<&'static ShapeDescriptor, ShapeError> {
        update_product_shape()
    }
}

/// Normalized product ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Trimmed, lower-cased title.
    pub title: String,
    /// Price.
    pub price: f64,
    /// Discount, zero when omitted.
    pub discount: f64,
}

impl NewProduct {
    /// Normalize a validated creation payload.
    pub fn from_dto(dto: Validated<CreateProductDto>) -> Result<Self, PrimitiveError> {
        let dto = dto.into_inner();
        Ok(Self {
            title: normalize_label("title", &dto.title)?,
            price: dto.price,
            discount: dto.discount.unwrap_or(0.0),
        })
    }
}

/// Normalized partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    /// Replacement title, already normalized.
    pub title: Option<String>,
    /// Replacement price.
    pub price: Option<f64>,
    /// Replacement discount.
    pub discount: Option<f64>,
}

impl ProductPatch {
    /// Normalize a validated update payload.
    pub fn from_dto(dto: Validated<UpdateProductDto>) -> Result<Self, PrimitiveError> {
        let dto = dto.into_inner();
        let title = match dto.title.as_deref() {
            Some(title) => Some(normalize_label("title", title)?),
            None => None,
        };
        Ok(Self {
            title,
            price: dto.price,
            discount: dto.discount,
        })
    }

    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none() && self.discount.is_none()
    }
}

/// Stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Record identifier.
    pub id: ProductId,
    /// Normalized title.
    pub title: String,
    /// Price.
    pub price: f64,
    /// Discount percentage.
    pub discount: f64,
    /// Creation time.
    pub created_at: EpochMillis,
    /// Last modification time.
    pub updated_at: EpochMillis,
}

impl Product {
    /// Materialize a new record.
    #[must_use]
    pub fn create(id: ProductId, product: NewProduct, now: EpochMillis) -> Self {
        Self {
            id,
            title: product.title,
            price: product.price,
            discount: product.discount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch, bumping `updated_at`.
    pub fn apply(&mut self, patch: ProductPatch, now: EpochMillis) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(discount) = patch.discount {
            self.discount = discount;
        }
        self.updated_at = now;
    }
}

/// Error returned when a product id does not resolve.
#[must_use]
pub fn product_not_found(id: &ProductId) -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::new("product", "not_found"), "Product Not Found")
        .with_metadata("productId", id.to_string())
}
