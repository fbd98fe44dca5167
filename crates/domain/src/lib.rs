//! # storefront-domain
//!
//! Request shapes, typed DTOs, and records for the storefront resources.
//!
//! - **Auth** - signup, account update, and login shapes; `Account` records
//! - **Product** - create and update shapes; `Product` records
//! - **Primitives** - `ProductId`, `AccountId`, label normalization
//! - **Registry** - shape lookup by name
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` and `validation`
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use storefront_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod auth;
pub mod primitives;
pub mod product;
pub mod registry;

pub use auth::{
    Account, CreateAuthDto, LoginDto, NAME_MAX_LENGTH, NewAccount, PASSWORD_MAX_LENGTH,
    PASSWORD_MIN_LENGTH, SessionClaims, UpdateAuthDto, account_not_found, create_auth_shape,
    email_already_exists, invalid_credentials, login_shape, update_auth_shape,
};
pub use primitives::{AccountId, EpochMillis, PrimitiveError, ProductId, normalize_label};
pub use product::{
    CreateProductDto, DISCOUNT_MAX, NewProduct, Product, ProductPatch, TITLE_MAX_LENGTH,
    UpdateProductDto, create_product_shape, product_not_found, update_product_shape,
};
pub use registry::{all_shapes, find_shape, shape_names};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        let version = domain_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn domain_depends_on_shared() {
        let shared_version = shared_crate_version();
        assert!(!shared_version.is_empty());
    }
}
