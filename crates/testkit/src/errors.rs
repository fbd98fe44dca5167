//! Test fixtures for shared error codes and envelopes.

use storefront_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// A store outage fixture, as a document-store driver would report it.
pub fn storage_unavailable_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::io(),
        "connection to document store refused",
        ErrorClass::Retriable,
    )
}

/// An invalid input error fixture.
pub fn invalid_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input")
}
