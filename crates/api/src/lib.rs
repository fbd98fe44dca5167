//! # storefront-api
//!
//! API data transfer objects, response envelopes, and wire mappers.
//! This crate depends only on `domain`, `validation`, and `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// API v1 DTOs.
pub mod v1;

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
