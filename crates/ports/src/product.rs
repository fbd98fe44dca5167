//! Product storage boundary contract.

use crate::BoxFuture;
use storefront_domain::{NewProduct, Product, ProductId, ProductPatch};
use storefront_shared::Result;

/// Boundary contract for the product collection.
///
/// Implementations own identifier assignment and the `createdAt`/`updatedAt`
/// timestamps.
pub trait ProductStorePort: Send + Sync {
    /// Every product, newest first.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Product>>>;

    /// Persist a new product and return the stored record.
    fn insert(&self, product: NewProduct) -> BoxFuture<'_, Result<Product>>;

    /// Apply a patch; `None` when the id is unknown.
    fn update(&self, id: ProductId, patch: ProductPatch) -> BoxFuture<'_, Result<Option<Product>>>;

    /// Remove a product; `None` when the id is unknown.
    fn delete(&self, id: ProductId) -> BoxFuture<'_, Result<Option<Product>>>;
}
