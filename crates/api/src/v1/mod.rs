//! API v1 DTOs and helpers.

mod mappers;
mod schema;
mod types;
mod validation;

pub use mappers::{
    error_code_to_api_v1, error_envelope_to_api_v1_error, error_envelope_to_api_v1_response,
    status_for_error, validation_outcome_to_api_v1,
};
pub use schema::{
    api_v1_create_product_request_schema, api_v1_login_request_schema, api_v1_request_schema,
    api_v1_signup_request_schema, api_v1_update_account_request_schema,
    api_v1_update_product_request_schema,
};
pub use types::*;
pub use validation::validate_request_body;
