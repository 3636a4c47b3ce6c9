//! Verification request and result types exchanged with the provider.

use pv_shared::phone::{is_valid_e164_mobile, mask_phone_number};
use pv_shared::validation::is_numeric_with_length;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

/// Shortest code either side accepts
pub const CODE_MIN_LENGTH: usize = 4;

/// Longest code the gateway accepts
pub const GATEWAY_CODE_MAX_LENGTH: usize = 10;

/// Longest code the client accepts before calling the gateway.
/// Narrower than the gateway bound; both are kept as observed.
pub const CLIENT_CODE_MAX_LENGTH: usize = 8;

/// Provider status that signals a successful check
pub const APPROVED_STATUS: &str = "approved";

/// Trimmed phone number that passed strict E.164 mobile validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('+') || !is_valid_e164_mobile(trimmed) {
            return Err(ValidationError::InvalidPhoneFormat);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for logs
    pub fn masked(&self) -> String {
        mask_phone_number(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Trimmed, purely numeric code within the gateway length bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if !is_numeric_with_length(trimmed, CODE_MIN_LENGTH, GATEWAY_CODE_MAX_LENGTH) {
            return Err(ValidationError::InvalidCodeFormat);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Delivery channel requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Sms,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
        }
    }
}

/// A validated, per-call verification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub phone: PhoneNumber,
    pub code: Option<VerificationCode>,
}

impl VerificationRequest {
    /// Validate input for starting a verification
    pub fn start(phone: Option<&str>) -> Result<Self, ValidationError> {
        let phone = require("phone", phone)?;
        Ok(Self {
            phone: PhoneNumber::parse(phone)?,
            code: None,
        })
    }

    /// Validate input for checking a code. Presence of both fields is
    /// checked before either format.
    pub fn check(phone: Option<&str>, code: Option<&str>) -> Result<Self, ValidationError> {
        let phone = require("phone", phone)?;
        let code = require("code", code)?;
        Ok(Self {
            phone: PhoneNumber::parse(phone)?,
            code: Some(VerificationCode::parse(code)?),
        })
    }
}

fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { field }),
    }
}

/// Status string relayed verbatim from the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationStatus(String);

impl VerificationStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_approved(&self) -> bool {
        self.0 == APPROVED_STATUS
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for VerificationStatus {
    fn from(status: String) -> Self {
        Self(status)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
