//! Data Transfer Objects for API requests and responses

pub mod verification;

pub use pv_shared::StatusResponse;
pub use verification::{CheckVerificationRequest, StartVerificationRequest};
