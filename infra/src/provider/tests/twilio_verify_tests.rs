//! Unit tests for the Twilio Verify provider

use std::time::Duration;

use pv_core::domain::Channel;
use pv_core::errors::ProviderErrorKind;
use pv_core::services::VerificationProvider;

use crate::provider::twilio_verify::{parse_error_body, TwilioErrorBody};
use crate::provider::{TwilioVerifyConfig, TwilioVerifyProvider};

fn config(base_url: &str) -> TwilioVerifyConfig {
    TwilioVerifyConfig {
        account_sid: "ACtest_account_sid".to_string(),
        auth_token: "test_auth_token".to_string(),
        verify_service_sid: "VAtest_service".to_string(),
        base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(2),
    }
}

#[test]
fn test_endpoint_urls() {
    let provider = TwilioVerifyProvider::new(config("https://verify.twilio.com")).unwrap();
    assert_eq!(
        provider.verifications_url(),
        "https://verify.twilio.com/v2/Services/VAtest_service/Verifications"
    );
    assert_eq!(
        provider.verification_check_url(),
        "https://verify.twilio.com/v2/Services/VAtest_service/VerificationCheck"
    );
}

#[test]
fn test_config_from_provider_config_strips_trailing_slash() {
    let shared = pv_shared::ProviderConfig {
        base_url: "https://example.test/".to_string(),
        request_timeout_secs: 7,
        ..Default::default()
    };
    let config = TwilioVerifyConfig::from(&shared);
    assert_eq!(config.base_url, "https://example.test");
    assert_eq!(config.request_timeout, Duration::from_secs(7));
}

#[test]
fn test_parse_error_body() {
    let body = r#"{"code": 60200, "message": "Invalid parameter `To`", "more_info": "https://www.twilio.com/docs/errors/60200", "status": 400}"#;
    assert_eq!(
        parse_error_body(body),
        Some(TwilioErrorBody {
            code: Some(60200),
            message: Some("Invalid parameter `To`".to_string()),
        })
    );
    assert_eq!(parse_error_body("<html>bad gateway</html>"), None);
}

#[tokio::test]
async fn test_unreachable_provider_is_a_transport_error() {
    // Port 1 on loopback refuses connections
    let provider = TwilioVerifyProvider::new(config("http://127.0.0.1:1")).unwrap();

    let err = provider
        .create_verification("+14155552671", Channel::Sms)
        .await
        .unwrap_err();
    assert!(
        matches!(err.kind, ProviderErrorKind::Transport | ProviderErrorKind::Timeout),
        "unexpected error kind: {:?}",
        err.kind
    );
}
