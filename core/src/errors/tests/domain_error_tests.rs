//! Unit tests for domain error types

use crate::errors::{DomainError, ProviderError, ProviderErrorKind, ValidationError};

#[test]
fn test_validation_public_messages() {
    assert_eq!(
        ValidationError::MissingField { field: "phone" }.public_message(),
        "Invalid request."
    );
    assert_eq!(
        ValidationError::InvalidPhoneFormat.public_message(),
        "Invalid phone number format."
    );
    assert_eq!(
        ValidationError::InvalidCodeFormat.public_message(),
        "Invalid verification code format."
    );
}

#[test]
fn test_provider_detail_is_not_public() {
    let error = DomainError::from(ProviderError::rejected(
        404,
        Some(20404),
        "The requested resource /Services/VA123/VerificationCheck was not found",
    ));
    assert_eq!(error.public_message(), "Internal server error.");
    // The detail is still there for logs
    assert!(error.to_string().contains("20404"));
    assert!(error.to_string().contains("VerificationCheck"));
}

#[test]
fn test_rate_limited_message() {
    let error = DomainError::RateLimited { retry_after_secs: 30 };
    assert_eq!(error.public_message(), "Too many requests, please try again later.");
    assert!(error.to_string().contains("30s"));
}

#[test]
fn test_provider_error_kinds() {
    assert_eq!(ProviderError::timeout("slow").kind, ProviderErrorKind::Timeout);
    assert_eq!(ProviderError::transport("reset").to_string(), "transport: reset");
    assert_eq!(
        ProviderError::rejected(500, None, "boom").to_string(),
        "rejected (http 500): boom"
    );
}
