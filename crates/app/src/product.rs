//! Product CRUD handlers.

use crate::policy::{INTERNAL_SERVER_ERROR_MESSAGE, ResponsePolicy};
use crate::respond::{emit, failed, rejected};
use serde_json::Value;
use std::sync::Arc;
use storefront_api::v1::{ApiV1Response, validate_request_body};
use storefront_domain::{
    CreateProductDto, NewProduct, Product, ProductId, ProductPatch, UpdateProductDto,
    product_not_found,
};
use storefront_ports::{LogEvent, LogLevel, LoggerPort, ProductStorePort};
use storefront_shared::{ErrorCode, ErrorEnvelope, Result};

/// Dependencies required by the product handlers.
#[derive(Clone)]
pub struct ProductDeps {
    /// Product collection.
    pub products: Arc<dyn ProductStorePort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
    /// Environment-dependent response behavior.
    pub policy: ResponsePolicy,
}

impl ProductDeps {
    fn fail(&self, event: &str, error: &ErrorEnvelope) -> ApiV1Response {
        failed(
            self.logger.as_ref(),
            event,
            error,
            INTERNAL_SERVER_ERROR_MESSAGE,
            self.policy.expose_internal_errors,
        )
    }

    fn succeeded(&self, event: &str, message: &str, product: &Product) {
        emit(
            self.logger.as_ref(),
            LogEvent::new(LogLevel::Info, event, message)
                .with_field("productId", product.id.to_string()),
        );
    }
}

/// `GET /api/product`: every product, newest first.
#[tracing::instrument(name = "product.list", skip_all)]
pub async fn list_products(deps: &ProductDeps) -> ApiV1Response {
    match deps.products.list().await {
        Ok(products) => {
            tracing::debug!(count = products.len(), "products listed");
            ApiV1Response::products(&products)
        },
        Err(error) => deps.fail("product.list.failed", &error),
    }
}

/// `POST /api/product`.
///
/// A title that is blank once trimmed is refused with a 400.
#[tracing::instrument(name = "product.create", skip_all)]
pub async fn create_product(deps: &ProductDeps, body: Value) -> ApiV1Response {
    let dto = match validate_request_body::<CreateProductDto>(body).await {
        Ok(dto) => dto,
        Err(response) => {
            return rejected(deps.logger.as_ref(), "product.create.rejected", response);
        },
    };

    let result = match NewProduct::from_dto(dto) {
        Ok(product) => deps.products.insert(product).await,
        Err(error) => Err(error.into()),
    };
    match result {
        Ok(product) => {
            deps.succeeded("product.create.succeeded", "Product created", &product);
            ApiV1Response::ok_message("Product created successfully")
        },
        Err(error) => deps.fail("product.create.failed", &error),
    }
}

/// `PUT /api/product/:id`.
///
/// An id that does not parse is reported like an unknown one: 404.
#[tracing::instrument(name = "product.update", skip_all, fields(product_id = id))]
pub async fn update_product(deps: &ProductDeps, id: &str, body: Value) -> ApiV1Response {
    let dto = match validate_request_body::<UpdateProductDto>(body).await {
        Ok(dto) => dto,
        Err(response) => {
            return rejected(deps.logger.as_ref(), "product.update.rejected", response);
        },
    };

    let result = match ProductPatch::from_dto(dto) {
        Ok(patch) => apply_update(deps, id, patch).await,
        Err(error) => Err(error.into()),
    };
    match result {
        Ok(product) => {
            deps.succeeded("product.update.succeeded", "Product updated", &product);
            ApiV1Response::ok_message("Product updated successfully")
        },
        Err(error) => deps.fail("product.update.failed", &error),
    }
}

/// `DELETE /api/product/:id`.
#[tracing::instrument(name = "product.delete", skip_all, fields(product_id = id))]
pub async fn delete_product(deps: &ProductDeps, id: &str) -> ApiV1Response {
    match remove(deps, id).await {
        Ok(product) => {
            deps.succeeded("product.delete.succeeded", "Product deleted", &product);
            ApiV1Response::ok_message("Product deleted successfully")
        },
        Err(error) => deps.fail("product.delete.failed", &error),
    }
}

async fn apply_update(deps: &ProductDeps, raw_id: &str, patch: ProductPatch) -> Result<Product> {
    let id = parse_id(raw_id)?;
    deps.products
        .update(id, patch)
        .await?
        .ok_or_else(|| product_not_found(&id))
}

async fn remove(deps: &ProductDeps, raw_id: &str) -> Result<Product> {
    let id = parse_id(raw_id)?;
    deps.products
        .delete(id)
        .await?
        .ok_or_else(|| product_not_found(&id))
}

fn parse_id(raw_id: &str) -> Result<ProductId> {
    ProductId::parse(raw_id).map_err(|error| {
        tracing::debug!(%error, "product id does not parse");
        ErrorEnvelope::expected(ErrorCode::new("product", "not_found"), "Product Not Found")
            .with_metadata("productId", raw_id.trim().to_owned())
    })
}
