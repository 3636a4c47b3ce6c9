//! Unit tests for verification request types

use crate::domain::entities::verification::{
    PhoneNumber, VerificationCode, VerificationRequest, VerificationStatus,
};
use crate::errors::ValidationError;

#[test]
fn test_phone_number_is_trimmed_and_kept_verbatim() {
    let phone = PhoneNumber::parse("  +14155552671\t").unwrap();
    assert_eq!(phone.as_str(), "+14155552671");
    assert_eq!(phone.masked(), "***2671");
    assert_eq!(phone.to_string(), "***2671");
}

#[test]
fn test_phone_number_rejects_malformed_input() {
    for raw in ["invalid", "14155552671", "+1 415 555 2671", "+1234567890", "   ", "+"] {
        assert_eq!(
            PhoneNumber::parse(raw),
            Err(ValidationError::InvalidPhoneFormat),
            "expected {raw:?} to be rejected"
        );
    }
}

#[test]
fn test_code_bounds() {
    assert!(VerificationCode::parse("1234").is_ok());
    assert!(VerificationCode::parse("1234567890").is_ok());
    assert_eq!(VerificationCode::parse(" 123456 ").unwrap().as_str(), "123456");

    for raw in ["abc", "123", "12345678901", "12 34", "12.45", ""] {
        assert_eq!(
            VerificationCode::parse(raw),
            Err(ValidationError::InvalidCodeFormat),
            "expected {raw:?} to be rejected"
        );
    }
}

#[test]
fn test_start_requires_phone() {
    assert_eq!(
        VerificationRequest::start(None),
        Err(ValidationError::MissingField { field: "phone" })
    );
    assert_eq!(
        VerificationRequest::start(Some("")),
        Err(ValidationError::MissingField { field: "phone" })
    );
    // Whitespace is present, just malformed
    assert_eq!(
        VerificationRequest::start(Some("  ")),
        Err(ValidationError::InvalidPhoneFormat)
    );
}

#[test]
fn test_check_reports_missing_before_format() {
    assert_eq!(
        VerificationRequest::check(Some("invalid"), None),
        Err(ValidationError::MissingField { field: "code" })
    );
    assert_eq!(
        VerificationRequest::check(Some("invalid"), Some("abc")),
        Err(ValidationError::InvalidPhoneFormat)
    );
    assert_eq!(
        VerificationRequest::check(Some("+14155552671"), Some("abc")),
        Err(ValidationError::InvalidCodeFormat)
    );

    let request = VerificationRequest::check(Some("+14155552671"), Some("123456")).unwrap();
    assert_eq!(request.code.as_ref().map(|c| c.as_str()), Some("123456"));
}

#[test]
fn test_status_approval() {
    assert!(VerificationStatus::new("approved").is_approved());
    assert!(!VerificationStatus::new("pending").is_approved());
    assert!(!VerificationStatus::new("Approved").is_approved());
}
