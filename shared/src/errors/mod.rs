//! Wire-level error body and the fixed messages the gateway emits

use serde::{Deserialize, Serialize};

/// Error body returned by every failing gateway endpoint: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Success body for both verification endpoints: `{"status": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Messages surfaced to callers. Provider detail never appears here.
pub mod messages {
    pub const INVALID_REQUEST: &str = "Invalid request.";
    pub const INVALID_PHONE_FORMAT: &str = "Invalid phone number format.";
    pub const INVALID_CODE_FORMAT: &str = "Invalid verification code format.";
    pub const TOO_MANY_REQUESTS: &str = "Too many requests, please try again later.";
    pub const INTERNAL_ERROR: &str = "Internal server error.";
    pub const NOT_FOUND: &str = "Not found.";
}
