//! # storefront-adapters
//!
//! Concrete implementations of the outbound ports that ship with the service.
//! This crate depends on `ports` and `shared` only.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod log_sink;
pub mod logger;

pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::JsonLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
