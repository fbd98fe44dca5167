//! API v1 response mapping helpers.

use crate::v1::{
    ApiV1Body, ApiV1ErrorCode, ApiV1ErrorDto, ApiV1ErrorKind, ApiV1ErrorMeta, ApiV1Response,
    ApiV1ValidationFailedDto, status,
};
use storefront_shared::{ErrorCode, ErrorEnvelope, ErrorKind, REDACTED, is_secret_key};
use storefront_validation::ValidationOutcome;

/// Convert a shared `ErrorCode` into an API v1 error code string.
#[must_use]
pub fn error_code_to_api_v1(code: &ErrorCode) -> ApiV1ErrorCode {
    let namespace = sanitize_code_segment(code.namespace());
    let detail = sanitize_code_segment(code.code());
    format!("ERR_{namespace}_{detail}")
}

/// Map an `ErrorEnvelope` into a detailed API v1 error DTO.
#[must_use]
pub fn error_envelope_to_api_v1_error(
    envelope: &ErrorEnvelope,
    extra_meta: Option<ApiV1ErrorMeta>,
) -> ApiV1ErrorDto {
    let mut merged: ApiV1ErrorMeta = envelope.metadata.clone();
    if let Some(extra) = extra_meta {
        merged.extend(extra);
    }
    let meta = if merged.is_empty() {
        None
    } else {
        Some(redact_api_v1_meta(merged))
    };

    ApiV1ErrorDto {
        code: error_code_to_api_v1(&envelope.code),
        message: envelope.message.clone(),
        kind: map_error_kind(envelope.kind),
        meta,
    }
}

/// Map a failed validation outcome into the uniform 400 response.
#[must_use]
pub fn validation_outcome_to_api_v1(outcome: &ValidationOutcome) -> ApiV1Response {
    ApiV1Response {
        status: status::BAD_REQUEST,
        body: ApiV1Body::ValidationFailed(ApiV1ValidationFailedDto {
            message: storefront_validation::GENERAL_MESSAGE.to_owned(),
            errors: outcome.messages(),
        }),
        session: None,
    }
}

/// HTTP status for an error envelope.
///
/// Only `Expected` envelopes map to 4xx; everything else is a 500.
#[must_use]
pub fn status_for_error(envelope: &ErrorEnvelope) -> u16 {
    if envelope.kind != ErrorKind::Expected {
        return status::INTERNAL_SERVER_ERROR;
    }
    match envelope.code.code() {
        "not_found" | "account_not_found" => status::NOT_FOUND,
        "conflict" | "email_exists" => status::CONFLICT,
        "unauthorized" | "invalid_credentials" => status::UNAUTHORIZED,
        "invalid_input" => status::BAD_REQUEST,
        _ => status::INTERNAL_SERVER_ERROR,
    }
}

/// Map an error envelope into a `{"message": ...}` response.
///
/// 4xx responses carry the envelope message. 500 responses carry the
/// envelope message only when `expose_internal` is set, and
/// `fallback_message` otherwise.
#[must_use]
pub fn error_envelope_to_api_v1_response(
    envelope: &ErrorEnvelope,
    fallback_message: &str,
    expose_internal: bool,
) -> ApiV1Response {
    let status = status_for_error(envelope);
    let message = if status != status::INTERNAL_SERVER_ERROR || expose_internal {
        envelope.message.as_str()
    } else {
        fallback_message
    };
    ApiV1Response::message(status, message)
}

const fn map_error_kind(kind: ErrorKind) -> ApiV1ErrorKind {
    match kind {
        ErrorKind::Expected | ErrorKind::Unexpected => ApiV1ErrorKind::Expected,
        ErrorKind::Invariant => ApiV1ErrorKind::Invariant,
    }
}

fn sanitize_code_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn redact_api_v1_meta(meta: ApiV1ErrorMeta) -> ApiV1ErrorMeta {
    meta.into_iter()
        .map(|(key, value)| {
            if is_secret_key(&key) {
                (key, REDACTED.to_owned())
            } else {
                (key, value)
            }
        })
        .collect()
}
