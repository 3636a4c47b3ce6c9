//! Verification provider configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;

/// Which provider implementation backs the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Twilio Verify v2
    #[default]
    Twilio,
    /// In-process provider that approves a fixed code
    Mock,
}

/// External SMS-verification provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: String,

    /// Twilio auth token
    #[serde(default)]
    pub auth_token: String,

    /// Twilio Verify service SID
    #[serde(default)]
    pub verify_service_sid: String,

    /// Base URL of the Verify API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on a single provider call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Code accepted by the mock provider
    #[serde(default = "default_mock_approved_code")]
    pub mock_approved_code: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            account_sid: String::new(),
            auth_token: String::new(),
            verify_service_sid: String::new(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            mock_approved_code: default_mock_approved_code(),
        }
    }
}

impl ProviderConfig {
    /// Mock provider configuration
    pub fn mock() -> Self {
        Self {
            kind: ProviderKind::Mock,
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Ensure the selected provider has what it needs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "provider.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.kind == ProviderKind::Twilio {
            for (name, value) in [
                ("TWILIO_ACCOUNT_SID", &self.account_sid),
                ("TWILIO_AUTH_TOKEN", &self.auth_token),
                ("TWILIO_VERIFY_SERVICE_SID", &self.verify_service_sid),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!("{} not set", name)));
                }
            }
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    String::from("https://verify.twilio.com")
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_mock_approved_code() -> String {
    String::from("123456")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twilio_requires_credentials() {
        let config = ProviderConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TWILIO_ACCOUNT_SID"));
    }

    #[test]
    fn test_twilio_with_credentials_is_valid() {
        let config = ProviderConfig {
            account_sid: "ACtest".to_string(),
            auth_token: "token".to_string(),
            verify_service_sid: "VAtest".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_mock_needs_no_credentials() {
        assert!(ProviderConfig::mock().validate().is_ok());
    }
}
