//! Mock verification provider for development
//!
//! Sends nothing. `create_verification` always answers `pending`;
//! `create_verification_check` answers `approved` only for the configured code.

use async_trait::async_trait;
use pv_core::domain::Channel;
use pv_core::errors::ProviderError;
use pv_core::services::{ProviderVerification, VerificationProvider};
use pv_shared::phone::mask_phone_number;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

pub const DEFAULT_APPROVED_CODE: &str = "123456";

pub struct MockVerificationProvider {
    approved_code: String,
    simulate_failure: AtomicBool,
    calls: AtomicU64,
}

impl Default for MockVerificationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVerificationProvider {
    pub fn new() -> Self {
        Self::with_approved_code(DEFAULT_APPROVED_CODE)
    }

    pub fn with_approved_code(code: impl Into<String>) -> Self {
        let approved_code = code.into();
        debug!("[MOCK] provider approves code {}", approved_code);
        Self {
            approved_code,
            simulate_failure: AtomicBool::new(false),
            calls: AtomicU64::new(0),
        }
    }

    /// Make every following call fail with a provider rejection
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Number of provider calls received so far
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(ProviderError::rejected(
                503,
                None,
                "mock provider failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationProvider for MockVerificationProvider {
    async fn create_verification(
        &self,
        to: &str,
        channel: Channel,
    ) -> Result<ProviderVerification, ProviderError> {
        self.record_call()?;
        debug!(
            to = %mask_phone_number(to),
            channel = channel.as_str(),
            "[MOCK] verification requested"
        );
        Ok(ProviderVerification::new("pending"))
    }

    async fn create_verification_check(
        &self,
        to: &str,
        code: &str,
    ) -> Result<ProviderVerification, ProviderError> {
        self.record_call()?;
        let status = if code == self.approved_code {
            "approved"
        } else {
            "pending"
        };
        debug!(to = %mask_phone_number(to), status, "[MOCK] verification checked");
        Ok(ProviderVerification::new(status))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
