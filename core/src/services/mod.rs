//! Business services containing domain logic and use cases.

pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use rate_limit::{InMemoryRateLimiter, RateLimitDecision, RateLimiterTrait};
pub use verification::{
    ProviderVerification, VerificationGateway, VerificationProvider, VerificationServiceConfig,
};
