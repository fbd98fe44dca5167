//! # storefront-ports
//!
//! Port traits for the storefront hexagonal architecture.
//!
//! This crate defines the interfaces between the handlers and the storage,
//! credential, and logging infrastructure. It depends only on `domain` and
//! `shared`.

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by port traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod account;
pub mod logger;
pub mod product;

pub use account::*;
pub use logger::*;
pub use product::*;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `storefront-domain`.
pub use storefront_domain::{
    Account, NewAccount, NewProduct, Product, ProductId, ProductPatch, SessionClaims,
};
