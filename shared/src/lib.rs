//! Shared utilities and common types for the PhoneVerify workspace
//!
//! This crate provides common functionality used across all crates:
//! - Configuration types and loading
//! - Wire-level response bodies and fixed error messages
//! - Utility functions (phone validation, input sanitizing)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, Environment, LoggingConfig, ProviderConfig, ProviderKind,
    RateLimitConfig, ServerConfig, TlsConfig,
};
pub use errors::{messages, ErrorResponse, StatusResponse};
pub use utils::{phone, validation};
