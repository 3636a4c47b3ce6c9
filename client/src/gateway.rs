//! HTTP client for the verification gateway
//!
//! Every outcome is folded into a [`GatewayReply`]. Transport failures and
//! bodies that are not JSON both become `NetworkError`.

use async_trait::async_trait;
use pv_core::domain::GatewayReply;
use pv_shared::phone::mask_phone_number;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::ClientError;

/// The two gateway operations the session needs
#[async_trait]
pub trait VerificationApi: Send + Sync {
    async fn start_verification(&self, phone: &str) -> GatewayReply;

    async fn check_verification(&self, phone: &str, code: &str) -> GatewayReply;
}

#[derive(Serialize)]
struct StartBody<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct CheckBody<'a> {
    phone: &'a str,
    code: &'a str,
}

/// reqwest-backed gateway client
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
}

impl GatewayClient {
    /// `insecure` accepts self-signed certificates, as served in development
    pub fn new(base_url: &str, timeout: Duration, insecure: bool) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> GatewayReply {
        let url = format!("{}{}", self.base_url, path);

        let response = match self.http.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Gateway request failed");
                return GatewayReply::NetworkError;
            }
        };

        let status = response.status();
        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                warn!(url = %url, http_status = status.as_u16(), error = %e, "Unreadable gateway response");
                return GatewayReply::NetworkError;
            }
        };

        debug!(url = %url, http_status = status.as_u16(), "Gateway responded");
        reply_from(status.is_success(), &data)
    }
}

/// Fold an HTTP outcome into a session reply
pub fn reply_from(success: bool, data: &Value) -> GatewayReply {
    if success {
        let status = data
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default();
        GatewayReply::Status(status.to_string())
    } else {
        let error = data
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        GatewayReply::Rejected(error)
    }
}

#[async_trait]
impl VerificationApi for GatewayClient {
    async fn start_verification(&self, phone: &str) -> GatewayReply {
        debug!(phone = %mask_phone_number(phone), "Requesting verification code");
        self.post("/api/start-verification", &StartBody { phone }).await
    }

    async fn check_verification(&self, phone: &str, code: &str) -> GatewayReply {
        debug!(phone = %mask_phone_number(phone), "Checking verification code");
        self.post("/api/check-verification", &CheckBody { phone, code })
            .await
    }
}
