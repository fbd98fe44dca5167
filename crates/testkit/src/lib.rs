//! # storefront-testkit
//!
//! Test helpers and in-memory adapters.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod errors;
pub mod in_memory;
pub mod parity;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
