//! # PhoneVerify Core
//!
//! Core domain layer for phone verification. This crate contains the
//! validated request types, the client session state machine, the
//! verification gateway with its provider trait, the rate governor and the
//! error types the outer crates build on.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
