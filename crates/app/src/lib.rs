//! # storefront-app
//!
//! Request handlers for the auth and product resources.
//! Every handler validates its body before touching a port and answers with
//! an `ApiV1Response`; failures never escape as `Err`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod auth;
pub mod policy;
pub mod product;
mod respond;

pub use auth::{AuthDeps, LOGIN_FAILED_MESSAGE, SIGNUP_FAILED_MESSAGE, login, signup};
pub use policy::{INTERNAL_SERVER_ERROR_MESSAGE, ResponsePolicy};
pub use product::{ProductDeps, create_product, delete_product, list_products, update_product};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_domain::domain_crate_version;
    use storefront_ports::ports_crate_version;
    use storefront_shared::shared_crate_version;

    #[test]
    fn app_crate_compiles() {
        assert!(!app_crate_version().is_empty());
    }

    #[test]
    fn app_can_use_ports_domain_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
