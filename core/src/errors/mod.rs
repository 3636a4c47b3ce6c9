//! Domain-specific error types and error handling.

use pv_shared::messages;
use std::fmt;
use thiserror::Error;

/// Input rejected before anything reaches the provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid phone number format")]
    InvalidPhoneFormat,

    #[error("Invalid verification code format")]
    InvalidCodeFormat,
}

impl ValidationError {
    /// Message safe to return to callers
    pub fn public_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => messages::INVALID_REQUEST,
            ValidationError::InvalidPhoneFormat => messages::INVALID_PHONE_FORMAT,
            ValidationError::InvalidCodeFormat => messages::INVALID_CODE_FORMAT,
        }
    }
}

/// Failure category of an external provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The call did not finish within the configured bound
    Timeout,
    /// Connection, TLS or I/O failure
    Transport,
    /// The provider answered with a non-success status
    Rejected { http_status: u16, code: Option<i64> },
    /// The provider answered 2xx with a body we could not use
    MalformedResponse,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::Timeout => write!(f, "timeout"),
            ProviderErrorKind::Transport => write!(f, "transport"),
            ProviderErrorKind::Rejected { http_status, code: Some(code) } => {
                write!(f, "rejected (http {}, code {})", http_status, code)
            }
            ProviderErrorKind::Rejected { http_status, code: None } => {
                write!(f, "rejected (http {})", http_status)
            }
            ProviderErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Error raised by a verification provider. Never serialized to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Timeout,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn rejected(http_status: u16, code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Rejected { http_status, code },
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::MalformedResponse,
            message: message.into(),
        }
    }
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Verification provider failure: {0}")]
    Provider(#[from] ProviderError),
}

impl DomainError {
    /// Message safe to return to callers; provider detail is collapsed
    pub fn public_message(&self) -> &'static str {
        match self {
            DomainError::Validation(err) => err.public_message(),
            DomainError::RateLimited { .. } => messages::TOO_MANY_REQUESTS,
            DomainError::Provider(_) => messages::INTERNAL_ERROR,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
