//! # Infrastructure Layer
//!
//! Concrete implementations of the verification provider that the core
//! gateway talks to:
//! - **Twilio Verify**: the v2 Verify REST API over HTTPS
//! - **Mock**: an in-process provider for development and tests
//!
//! [`provider::create_provider`] picks one from configuration.

pub mod provider;

pub use provider::{create_provider, MockVerificationProvider, TwilioVerifyProvider};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
