//! # storefront-shared
//!
//! Shared result types and error handling for the storefront workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Result and error envelope types
//! - The `Validated<T>` proof wrapper handed from validation to use-cases
//! - Secret detection and redaction for logs and error metadata
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - All public envelope types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod invariants;
pub mod redaction;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use invariants::Validated;
pub use redaction::{REDACTED, SecretString, is_secret_key};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::errors::{ErrorClass, ErrorCode, ErrorEnvelope};
    use super::result::Result;

    #[test]
    fn shared_error_types_are_available() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(error.kind, super::errors::ErrorKind::Expected);
        assert_eq!(error.class, ErrorClass::NonRetriable);
    }

    #[test]
    fn shared_result_defaults_to_the_envelope() {
        let value: Result<i32> = Err(ErrorEnvelope::expected(ErrorCode::not_found(), "gone"));
        assert!(value.is_err_and(|error| error.has_code(&ErrorCode::not_found())));
    }
}
