//! Configuration for the verification gateway

use pv_shared::ProviderConfig;
use std::time::Duration;

use crate::domain::entities::verification::Channel;

/// Default upper bound on a single provider call
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Configuration for the verification gateway
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Upper bound on a single provider call
    pub provider_timeout: Duration,
    /// Delivery channel requested when starting a verification
    pub channel: Channel,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            channel: Channel::Sms,
        }
    }
}

impl VerificationServiceConfig {
    pub fn from_provider_config(config: &ProviderConfig) -> Self {
        Self {
            provider_timeout: config.request_timeout(),
            ..Default::default()
        }
    }
}
