//! Request and response bodies for the verification endpoints
//!
//! Fields are kept as raw JSON values so that presence can be judged the
//! way loosely-typed clients expect: absent, `null`, `""`, `0` and `false`
//! all count as missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/start-verification`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StartVerificationRequest {
    #[serde(default)]
    pub phone: Option<Value>,
}

impl StartVerificationRequest {
    pub fn phone(&self) -> Option<&str> {
        phone_field(self.phone.as_ref())
    }
}

/// Body of `POST /api/check-verification`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckVerificationRequest {
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub code: Option<Value>,
}

impl CheckVerificationRequest {
    pub fn phone(&self) -> Option<&str> {
        phone_field(self.phone.as_ref())
    }

    /// The code as text. Numbers are accepted and rendered in decimal.
    pub fn code(&self) -> Option<String> {
        match self.code.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => Some(n.to_string()),
            // Present but not code-shaped; format validation rejects it
            other => Some(other.to_string()),
        }
    }
}

/// Only a non-empty string is a usable phone
fn phone_field(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}
