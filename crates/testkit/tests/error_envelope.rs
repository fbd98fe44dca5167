//! Integration tests for shared error propagation.

use storefront_shared::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind};
use storefront_testkit::errors::{invalid_input_error, storage_unavailable_error};

#[test]
fn error_envelope_crosses_crates() {
    let outage = storage_unavailable_error();
    assert_eq!(outage.code, ErrorCode::io());
    assert_eq!(outage.kind, ErrorKind::Unexpected);
    assert!(outage.class.is_retriable());
    assert_eq!(outage.class, ErrorClass::Retriable);

    let boxed: Box<dyn std::error::Error> = Box::new(outage);
    assert!(boxed.to_string().contains("document store"));
}

#[test]
fn error_envelope_constructors_work() {
    let expected = invalid_input_error();
    assert_eq!(expected.kind, ErrorKind::Expected);
    assert!(expected.has_code(&ErrorCode::invalid_input()));
    let rebuilt = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input");
    assert_eq!(rebuilt, expected);
}
