//! Domain primitives with validated constructors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_shared::{ErrorCode, ErrorEnvelope};
use uuid::Uuid;

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// `ProductId` is not a UUID.
    InvalidProductId {
        /// Trimmed input that failed to parse.
        input: String,
    },
    /// `AccountId` is not a UUID.
    InvalidAccountId {
        /// Trimmed input that failed to parse.
        input: String,
    },
    /// A label is empty once surrounding whitespace is removed.
    BlankLabel {
        /// Field the label was submitted for.
        field: &'static str,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidProductId { .. } => ErrorCode::new("product", "invalid_id"),
            Self::InvalidAccountId { .. } => ErrorCode::new("auth", "invalid_id"),
            Self::BlankLabel { .. } => ErrorCode::invalid_input(),
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProductId { .. } => formatter.write_str("ProductId must be a UUID"),
            Self::InvalidAccountId { .. } => formatter.write_str("AccountId must be a UUID"),
            Self::BlankLabel { field } => write!(formatter, "{field} should not be empty"),
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            PrimitiveError::InvalidProductId { input }
            | PrimitiveError::InvalidAccountId { input } => envelope.with_metadata("input", input),
            PrimitiveError::BlankLabel { field } => envelope.with_metadata("field", field),
        }
    }
}

/// Identifier of a stored product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a `ProductId` from a path segment.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let trimmed = input.as_ref().trim();
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| PrimitiveError::InvalidProductId {
                input: trimmed.to_owned(),
            })
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(formatter)
    }
}

/// Identifier of a registered account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an `AccountId` from user input.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
        let trimmed = input.as_ref().trim();
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| PrimitiveError::InvalidAccountId {
                input: trimmed.to_owned(),
            })
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(formatter)
    }
}

/// Milliseconds since the Unix epoch.
pub type EpochMillis = u64;

/// Storage form of a label: surrounding whitespace removed, lower-cased.
///
/// A label that is blank after trimming is rejected for `field`.
pub fn normalize_label(field: &'static str, raw: &str) -> Result<String, PrimitiveError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PrimitiveError::BlankLabel { field });
    }
    Ok(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn product_id_rejects_non_uuid_input() {
        let error = ProductId::parse("64b7f0c2e1").err();
        assert!(matches!(
            error,
            Some(PrimitiveError::InvalidProductId { ref input }) if input == "64b7f0c2e1"
        ));
    }

    #[test]
    fn ids_parse_their_display_form() -> Result<(), PrimitiveError> {
        let product = ProductId::generate();
        assert_eq!(ProductId::parse(format!(" {product} "))?, product);
        let account = AccountId::generate();
        assert_eq!(AccountId::parse(account.to_string())?, account);
        Ok(())
    }

    #[test]
    fn primitive_errors_become_expected_envelopes() {
        let envelope = ErrorEnvelope::from(PrimitiveError::InvalidAccountId {
            input: "nope".to_owned(),
        });
        assert_eq!(envelope.code, ErrorCode::new("auth", "invalid_id"));
        assert_eq!(envelope.metadata.get("input").map(String::as_str), Some("nope"));
    }

    #[test]
    fn blank_labels_are_invalid_input() {
        let error = normalize_label("title", " \t ").err();
        assert_eq!(error, Some(PrimitiveError::BlankLabel { field: "title" }));

        let envelope = ErrorEnvelope::from(PrimitiveError::BlankLabel { field: "name" });
        assert_eq!(envelope.code, ErrorCode::invalid_input());
        assert_eq!(envelope.message, "name should not be empty");
        assert_eq!(envelope.metadata.get("field").map(String::as_str), Some("name"));
    }

    proptest! {
        #[test]
        fn normalized_labels_are_trimmed_and_lowercase(raw in "[ \t]{0,3}[a-zA-Z]{1,8}[a-zA-Z ]{0,12}[ \t]{0,3}") {
            let label = normalize_label("title", &raw);
            prop_assert!(label.is_ok());
            let label = label.unwrap_or_default();
            prop_assert_eq!(label.trim(), label.as_str());
            prop_assert_eq!(label.to_lowercase(), label.clone());
        }
    }
}
