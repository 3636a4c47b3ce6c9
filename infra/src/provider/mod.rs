//! Verification provider implementations
//!
//! Both providers implement [`pv_core::services::VerificationProvider`]. The
//! gateway is generic over the trait, so `main` can pick one at runtime
//! through the boxed form returned by [`create_provider`].

pub mod mock;
pub mod twilio_verify;

pub use mock::MockVerificationProvider;
pub use twilio_verify::{TwilioVerifyConfig, TwilioVerifyProvider};

use pv_core::services::VerificationProvider;
use pv_shared::{ProviderConfig, ProviderKind};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create a verification provider based on configuration
///
/// # Errors
///
/// * `InfrastructureError::Config` - the Twilio settings are incomplete
/// * `InfrastructureError::Http` - the HTTP client could not be built
pub fn create_provider(
    config: &ProviderConfig,
) -> Result<Box<dyn VerificationProvider>, InfrastructureError> {
    match config.kind {
        ProviderKind::Mock => {
            tracing::warn!("Using mock verification provider; no SMS will be sent");
            Ok(Box::new(MockVerificationProvider::with_approved_code(
                config.mock_approved_code.clone(),
            )))
        }
        ProviderKind::Twilio => {
            config
                .validate()
                .map_err(|e| InfrastructureError::Config(e.to_string()))?;
            let provider = TwilioVerifyProvider::new(TwilioVerifyConfig::from(config))?;
            tracing::info!(
                base_url = %config.base_url,
                "Twilio Verify provider initialized"
            );
            Ok(Box::new(provider))
        }
    }
}
