//! Request body validation at the API boundary.

use crate::v1::{ApiV1Response, validation_outcome_to_api_v1};
use serde_json::Value;
use storefront_shared::Validated;
use storefront_validation::{Dto, validate_dto_async};

/// Validate a request body against `T`'s shape.
///
/// On failure the error is the ready-to-send 400 response; on success the
/// typed DTO, never the raw body.
pub async fn validate_request_body<T: Dto>(body: Value) -> Result<Validated<T>, ApiV1Response> {
    validate_dto_async::<T>(body)
        .await
        .map_err(|outcome| validation_outcome_to_api_v1(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::{ApiV1Body, ApiV1CreateProductRequestDto, ApiV1LoginRequestDto};
    use serde_json::json;

    #[tokio::test]
    async fn invalid_body_becomes_400_with_ordered_messages() {
        let Err(response) =
            validate_request_body::<ApiV1CreateProductRequestDto>(json!({ "title": "", "price": -1 }))
                .await
        else {
            panic!("body should fail");
        };
        assert_eq!(response.status, 400);
        let ApiV1Body::ValidationFailed(body) = response.body else {
            panic!("expected validation body");
        };
        assert_eq!(body.message, "Validation failed");
        assert_eq!(
            body.errors,
            ["title: Title is required", "price: Price must be non-negative"]
        );
    }

    #[tokio::test]
    async fn valid_body_yields_typed_dto() {
        let result = validate_request_body::<ApiV1LoginRequestDto>(json!({
            "email": "ada@example.com",
            "password": "hunter22",
            "remember": true
        }))
        .await;
        let Ok(dto) = result else {
            panic!("body should validate");
        };
        assert_eq!(dto.email, "ada@example.com");
    }
}
