//! Verification gateway implementation

use std::future::Future;
use std::sync::Arc;

use crate::domain::entities::verification::{VerificationRequest, VerificationStatus};
use crate::errors::{DomainResult, ProviderError};

use super::config::VerificationServiceConfig;
use super::traits::{ProviderVerification, VerificationProvider};

/// Stateless relay between callers and the verification provider.
///
/// Holds no per-phone state. Each call validates its input, makes at most
/// one provider call and returns the provider's status verbatim.
pub struct VerificationGateway<P: VerificationProvider> {
    provider: Arc<P>,
    config: VerificationServiceConfig,
}

impl<P: VerificationProvider> Clone for VerificationGateway<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
        }
    }
}

impl<P: VerificationProvider> VerificationGateway<P> {
    pub fn new(provider: Arc<P>, config: VerificationServiceConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Ask the provider to send a code to `phone`
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - phone missing or not a valid E.164 mobile number
    /// * `DomainError::Provider` - the provider failed, timed out or returned no status
    pub async fn start_verification(&self, phone: Option<&str>) -> DomainResult<VerificationStatus> {
        let request = VerificationRequest::start(phone)?;
        let masked = request.phone.masked();

        tracing::info!(
            phone = %masked,
            provider = self.provider.provider_name(),
            channel = self.config.channel.as_str(),
            "Starting verification"
        );

        let verification = self
            .call_provider(
                "create_verification",
                self.provider
                    .create_verification(request.phone.as_str(), self.config.channel),
            )
            .await
            .map_err(|e| {
                tracing::error!(phone = %masked, error = %e, "Failed to start verification");
                e
            })?;

        tracing::info!(
            phone = %masked,
            status = %verification.status,
            "Verification started"
        );
        Ok(verification.status)
    }

    /// Ask the provider whether `code` matches the code issued to `phone`.
    /// Any status is relayed; only `approved` means success to callers.
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - a field is missing or malformed
    /// * `DomainError::Provider` - the provider failed, timed out or returned no status
    pub async fn check_verification(
        &self,
        phone: Option<&str>,
        code: Option<&str>,
    ) -> DomainResult<VerificationStatus> {
        let request = VerificationRequest::check(phone, code)?;
        let masked = request.phone.masked();
        let code = request
            .code
            .as_ref()
            .map(|c| c.as_str())
            .unwrap_or_default();

        tracing::info!(
            phone = %masked,
            provider = self.provider.provider_name(),
            "Checking verification code"
        );

        let verification = self
            .call_provider(
                "create_verification_check",
                self.provider
                    .create_verification_check(request.phone.as_str(), code),
            )
            .await
            .map_err(|e| {
                tracing::error!(phone = %masked, error = %e, "Failed to check verification");
                e
            })?;

        tracing::info!(
            phone = %masked,
            status = %verification.status,
            approved = verification.status.is_approved(),
            "Verification checked"
        );
        Ok(verification.status)
    }

    async fn call_provider<F>(
        &self,
        operation: &'static str,
        call: F,
    ) -> Result<ProviderVerification, ProviderError>
    where
        F: Future<Output = Result<ProviderVerification, ProviderError>>,
    {
        let verification = tokio::time::timeout(self.config.provider_timeout, call)
            .await
            .map_err(|_| {
                ProviderError::timeout(format!(
                    "{} did not complete within {:?}",
                    operation, self.config.provider_timeout
                ))
            })??;

        if verification.status.as_str().is_empty() {
            return Err(ProviderError::malformed(format!(
                "{} returned an empty status",
                operation
            )));
        }
        Ok(verification)
    }
}
