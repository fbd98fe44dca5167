//! Shared response and logging helpers for the handlers.

use serde_json::json;
use std::sync::Arc;
use storefront_api::v1::{ApiV1Response, error_envelope_to_api_v1_response, status};
use storefront_ports::{LogEvent, LogLevel, LoggerPort};
use storefront_shared::ErrorEnvelope;

pub(crate) fn emit(logger: Option<&Arc<dyn LoggerPort>>, event: LogEvent) {
    if let Some(logger) = logger {
        logger.log(event);
    }
}

/// Log a 400 validation response and hand it back.
pub(crate) fn rejected(
    logger: Option<&Arc<dyn LoggerPort>>,
    event: &str,
    response: ApiV1Response,
) -> ApiV1Response {
    tracing::debug!(event, status = response.status, "request body rejected");
    if let Some(logger) = logger {
        let mut log = LogEvent::new(LogLevel::Warn, event, "Request body failed validation")
            .with_field("status", response.status);
        if let Ok(body) = response.body_json() {
            if let Some(errors) = body.get("errors") {
                log = log.with_field("errors", errors.clone());
            }
        }
        logger.log(log);
    }
    response
}

/// Map `error` to a response and log it at a level matching the status.
pub(crate) fn failed(
    logger: Option<&Arc<dyn LoggerPort>>,
    event: &str,
    error: &ErrorEnvelope,
    fallback_message: &str,
    expose_internal: bool,
) -> ApiV1Response {
    let response = error_envelope_to_api_v1_response(error, fallback_message, expose_internal);
    let level = if response.status == status::INTERNAL_SERVER_ERROR {
        tracing::error!(event, code = %error.code, "handler failed");
        LogLevel::Error
    } else {
        tracing::debug!(event, code = %error.code, status = response.status, "handler refused");
        LogLevel::Warn
    };
    emit(
        logger,
        LogEvent::new(level, event, &error.message)
            .with_field("status", response.status)
            .with_error(json!({
                "code": error.code.to_string(),
                "kind": error.kind.to_string(),
                "retriable": error.class.is_retriable(),
                "metadata": error.metadata,
            })),
    );
    response
}
