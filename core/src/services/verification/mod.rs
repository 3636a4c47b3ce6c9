//! Verification gateway module
//!
//! Validates phone and code input and relays it to an external
//! SMS-verification provider:
//! - strict E.164 phone validation before any provider call
//! - numeric code validation (4 to 10 digits)
//! - a bounded provider call that is never retried
//! - the provider status relayed verbatim

mod config;
mod service;
mod traits;


pub use config::VerificationServiceConfig;
pub use service::VerificationGateway;
pub use traits::{ProviderVerification, VerificationProvider};
