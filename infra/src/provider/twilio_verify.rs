//! Twilio Verify v2 provider
//!
//! Talks to the Verify REST API directly with `reqwest`:
//! - `POST {base}/v2/Services/{sid}/Verifications` with `To` and `Channel`
//! - `POST {base}/v2/Services/{sid}/VerificationCheck` with `To` and `Code`
//!
//! Calls are bounded by the configured timeout and never retried, so a send
//! reaches Twilio at most once.

use async_trait::async_trait;
use pv_core::domain::Channel;
use pv_core::errors::ProviderError;
use pv_core::services::{ProviderVerification, VerificationProvider};
use pv_shared::phone::mask_phone_number;
use pv_shared::ProviderConfig;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::InfrastructureError;

/// Twilio Verify settings
#[derive(Debug, Clone)]
pub struct TwilioVerifyConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
    /// Without trailing slash, e.g. `https://verify.twilio.com`
    pub base_url: String,
    pub request_timeout: Duration,
}

impl From<&ProviderConfig> for TwilioVerifyConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            verify_service_sid: config.verify_service_sid.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Success body of both Verify endpoints; only `status` is used
#[derive(Debug, Deserialize)]
struct VerificationResource {
    status: Option<String>,
}

/// Error body returned by the Twilio REST API
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct TwilioErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// Twilio Verify provider
pub struct TwilioVerifyProvider {
    client: Client,
    config: TwilioVerifyConfig,
}

impl TwilioVerifyProvider {
    pub fn new(config: TwilioVerifyConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    pub(crate) fn verifications_url(&self) -> String {
        format!(
            "{}/v2/Services/{}/Verifications",
            self.config.base_url, self.config.verify_service_sid
        )
    }

    pub(crate) fn verification_check_url(&self) -> String {
        format!(
            "{}/v2/Services/{}/VerificationCheck",
            self.config.base_url, self.config.verify_service_sid
        )
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<ProviderVerification, ProviderError> {
        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(params)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let parsed = parse_error_body(&body);
            let message = parsed
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(ProviderError::rejected(
                status.as_u16(),
                parsed.and_then(|b| b.code),
                message,
            ));
        }

        let resource: VerificationResource = serde_json::from_str(&body)
            .map_err(|e| ProviderError::malformed(format!("invalid JSON body: {}", e)))?;
        match resource.status {
            Some(status) if !status.is_empty() => Ok(ProviderVerification::new(status)),
            _ => Err(ProviderError::malformed("response has no status")),
        }
    }
}

#[async_trait]
impl VerificationProvider for TwilioVerifyProvider {
    async fn create_verification(
        &self,
        to: &str,
        channel: Channel,
    ) -> Result<ProviderVerification, ProviderError> {
        debug!(to = %mask_phone_number(to), channel = channel.as_str(), "POST Verifications");
        let url = self.verifications_url();
        self.post_form(&url, &[("To", to), ("Channel", channel.as_str())])
            .await
            .map_err(|e| {
                error!(to = %mask_phone_number(to), error = %e, "Twilio create verification failed");
                e
            })
    }

    async fn create_verification_check(
        &self,
        to: &str,
        code: &str,
    ) -> Result<ProviderVerification, ProviderError> {
        debug!(to = %mask_phone_number(to), "POST VerificationCheck");
        let url = self.verification_check_url();
        self.post_form(&url, &[("To", to), ("Code", code)])
            .await
            .map_err(|e| {
                error!(to = %mask_phone_number(to), error = %e, "Twilio verification check failed");
                e
            })
    }

    fn provider_name(&self) -> &str {
        "twilio"
    }
}

fn map_transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

pub(crate) fn parse_error_body(body: &str) -> Option<TwilioErrorBody> {
    serde_json::from_str(body).ok()
}
