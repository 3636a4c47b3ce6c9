//! Trait for external verification provider integration

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::verification::{Channel, VerificationStatus};
use crate::errors::ProviderError;

/// What the provider returns for either call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderVerification {
    pub status: VerificationStatus,
}

impl ProviderVerification {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::new(status),
        }
    }
}

/// External service that owns code generation, delivery and matching
#[async_trait]
pub trait VerificationProvider: Send + Sync {
    /// Issue a code to `to` over `channel`
    async fn create_verification(
        &self,
        to: &str,
        channel: Channel,
    ) -> Result<ProviderVerification, ProviderError>;

    /// Check `code` against the code last issued to `to`
    async fn create_verification_check(
        &self,
        to: &str,
        code: &str,
    ) -> Result<ProviderVerification, ProviderError>;

    /// Short name used in log lines
    fn provider_name(&self) -> &str;
}

#[async_trait]
impl<T: VerificationProvider + ?Sized> VerificationProvider for Box<T> {
    async fn create_verification(
        &self,
        to: &str,
        channel: Channel,
    ) -> Result<ProviderVerification, ProviderError> {
        (**self).create_verification(to, channel).await
    }

    async fn create_verification_check(
        &self,
        to: &str,
        code: &str,
    ) -> Result<ProviderVerification, ProviderError> {
        (**self).create_verification_check(to, code).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: VerificationProvider + ?Sized> VerificationProvider for Arc<T> {
    async fn create_verification(
        &self,
        to: &str,
        channel: Channel,
    ) -> Result<ProviderVerification, ProviderError> {
        (**self).create_verification(to, channel).await
    }

    async fn create_verification_check(
        &self,
        to: &str,
        code: &str,
    ) -> Result<ProviderVerification, ProviderError> {
        (**self).create_verification_check(to, code).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
