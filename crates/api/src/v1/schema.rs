//! JSON Schema exports for API v1 request DTOs.

use crate::v1::{
    ApiV1CreateProductRequestDto, ApiV1LoginRequestDto, ApiV1SignupRequestDto,
    ApiV1UpdateAccountRequestDto, ApiV1UpdateProductRequestDto,
};
use schemars::{Schema, schema_for};

/// JSON Schema for the signup body.
#[must_use]
pub fn api_v1_signup_request_schema() -> Schema {
    schema_for!(ApiV1SignupRequestDto)
}

/// JSON Schema for the account update body.
#[must_use]
pub fn api_v1_update_account_request_schema() -> Schema {
    schema_for!(ApiV1UpdateAccountRequestDto)
}

/// JSON Schema for the login body.
#[must_use]
pub fn api_v1_login_request_schema() -> Schema {
    schema_for!(ApiV1LoginRequestDto)
}

/// JSON Schema for the product creation body.
#[must_use]
pub fn api_v1_create_product_request_schema() -> Schema {
    schema_for!(ApiV1CreateProductRequestDto)
}

/// JSON Schema for the product update body.
#[must_use]
pub fn api_v1_update_product_request_schema() -> Schema {
    schema_for!(ApiV1UpdateProductRequestDto)
}

/// JSON Schema for the request DTO bound to a registered shape name.
#[must_use]
pub fn api_v1_request_schema(shape_name: &str) -> Option<Schema> {
    match shape_name {
        "create-auth" => Some(api_v1_signup_request_schema()),
        "update-auth" => Some(api_v1_update_account_request_schema()),
        "login" => Some(api_v1_login_request_schema()),
        "create-product" => Some(api_v1_create_product_request_schema()),
        "update-product" => Some(api_v1_update_product_request_schema()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_domain::shape_names;

    #[test]
    fn every_registered_shape_has_a_schema() {
        for name in shape_names() {
            assert!(api_v1_request_schema(name).is_some(), "missing schema for {name}");
        }
        assert!(api_v1_request_schema("checkout").is_none());
    }

    #[test]
    fn login_schema_lists_required_fields() {
        let schema = api_v1_login_request_schema();
        let required = schema
            .get("required")
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default();
        assert!(required.contains(&serde_json::json!("email")));
        assert!(required.contains(&serde_json::json!("password")));
    }
}
