//! Client-held verification session.
//!
//! Two steps: `Phone` (initial) and `Code`. A successful send moves the
//! session to `Code` and arms a countdown of [`COUNTDOWN_SECS`]; `unlocked`
//! is a flag inside `Code`. The session owns no timer. The caller drives
//! [`Session::tick`] once a second and stops when it returns `false`.

use pv_shared::phone::is_loose_mobile;
use pv_shared::validation::{is_numeric_with_length, sanitize};
use thiserror::Error;

use super::verification::{APPROVED_STATUS, CLIENT_CODE_MAX_LENGTH, CODE_MIN_LENGTH};

/// Lifetime of a sent code as shown to the user
pub const COUNTDOWN_SECS: u32 = 120;

/// Messages shown to the user
pub mod messages {
    pub const INVALID_PHONE_ENTRY: &str = "Please enter a valid phone number.";
    pub const CODE_SENT: &str = "Verification code sent!";
    pub const SEND_FAILED: &str = "Failed to send verification code.";
    pub const INVALID_PHONE: &str = "Invalid phone number.";
    pub const INVALID_CODE: &str = "Invalid code format.";
    pub const VERIFIED: &str = "Verification successful!";
    pub const CHECK_FAILED: &str = "Invalid code or verification failed.";
    pub const NETWORK_ERROR: &str = "Network error.";
    pub const EXPIRED: &str = "Time expired. Please request a new code.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Phone,
    Code,
}

/// What came back from a gateway call, as far as the session cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayReply {
    /// 2xx response carrying a `status`
    Status(String),
    /// Non-2xx response, with its `error` field when present
    Rejected(Option<String>),
    /// Transport failure or unreadable body
    NetworkError,
}

/// Why a submission did not start
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a request is already in flight")]
    InFlight,
    #[error("submission is not available in this step")]
    WrongStep,
    #[error("the code has expired")]
    Expired,
    #[error("input failed validation")]
    InvalidInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    phone: String,
    code: String,
    step: Step,
    time_left: u32,
    unlocked: bool,
    loading: bool,
    message: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phone: String::new(),
            code: String::new(),
            step: Step::Phone,
            time_left: COUNTDOWN_SECS,
            unlocked: false,
            loading: false,
            message: None,
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    /// Ignored once the code has expired; the input is disabled then
    pub fn set_code(&mut self, code: impl Into<String>) {
        if !self.is_expired() {
            self.code = code.into();
        }
    }

    /// Validate the phone entry and mark a send as in flight.
    /// Returns the sanitized phone to send.
    pub fn begin_send(&mut self) -> Result<String, SubmitError> {
        if self.loading {
            return Err(SubmitError::InFlight);
        }
        if self.step != Step::Phone {
            return Err(SubmitError::WrongStep);
        }
        self.message = None;
        self.unlocked = false;

        let phone = sanitize(&self.phone);
        if !is_loose_mobile(&phone) {
            self.message = Some(messages::INVALID_PHONE_ENTRY.to_string());
            return Err(SubmitError::InvalidInput);
        }
        self.loading = true;
        Ok(phone)
    }

    /// Apply the outcome of a send. Any 2xx moves the session to `Code`
    /// and resets the countdown.
    pub fn finish_send(&mut self, reply: GatewayReply) {
        self.loading = false;
        match reply {
            GatewayReply::Status(_) => {
                self.message = Some(messages::CODE_SENT.to_string());
                self.step = Step::Code;
                self.time_left = COUNTDOWN_SECS;
            }
            GatewayReply::Rejected(error) => {
                self.message = Some(error.unwrap_or_else(|| messages::SEND_FAILED.to_string()));
            }
            GatewayReply::NetworkError => {
                self.message = Some(messages::NETWORK_ERROR.to_string());
            }
        }
    }

    /// Validate phone and code and mark a check as in flight.
    /// Returns the sanitized `(phone, code)` pair to send.
    pub fn begin_check(&mut self) -> Result<(String, String), SubmitError> {
        if self.loading {
            return Err(SubmitError::InFlight);
        }
        if self.step != Step::Code {
            return Err(SubmitError::WrongStep);
        }
        if self.time_left == 0 {
            return Err(SubmitError::Expired);
        }
        self.message = None;

        let phone = sanitize(&self.phone);
        let code = sanitize(&self.code);
        if !is_loose_mobile(&phone) {
            self.message = Some(messages::INVALID_PHONE.to_string());
            return Err(SubmitError::InvalidInput);
        }
        if !is_numeric_with_length(&code, CODE_MIN_LENGTH, CLIENT_CODE_MAX_LENGTH) {
            self.message = Some(messages::INVALID_CODE.to_string());
            return Err(SubmitError::InvalidInput);
        }
        self.loading = true;
        Ok((phone, code))
    }

    /// Apply the outcome of a check. Only a 2xx with status `approved` unlocks.
    pub fn finish_check(&mut self, reply: GatewayReply) {
        self.loading = false;
        match reply {
            GatewayReply::Status(status) if status == APPROVED_STATUS => {
                self.message = Some(messages::VERIFIED.to_string());
                self.unlocked = true;
            }
            GatewayReply::Status(_) => {
                self.message = Some(messages::CHECK_FAILED.to_string());
                self.unlocked = false;
            }
            GatewayReply::Rejected(error) => {
                self.message = Some(error.unwrap_or_else(|| messages::CHECK_FAILED.to_string()));
                self.unlocked = false;
            }
            GatewayReply::NetworkError => {
                self.message = Some(messages::NETWORK_ERROR.to_string());
            }
        }
    }

    /// Whether the one-second countdown should keep running
    pub fn countdown_active(&self) -> bool {
        self.step == Step::Code && !self.unlocked && self.time_left > 0
    }

    /// Advance the countdown by one second. Returns `false`, leaving the
    /// session untouched, when the countdown is not active.
    pub fn tick(&mut self) -> bool {
        if !self.countdown_active() {
            return false;
        }
        self.time_left -= 1;
        true
    }

    /// In `Code` with no time left: input and submission are disabled
    pub fn is_expired(&self) -> bool {
        self.step == Step::Code && self.time_left == 0
    }

    pub fn can_submit_phone(&self) -> bool {
        self.step == Step::Phone && !self.loading
    }

    pub fn can_submit_code(&self) -> bool {
        self.step == Step::Code && !self.loading && self.time_left > 0
    }

    /// Remaining time as a percentage of the full countdown
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.time_left) / f64::from(COUNTDOWN_SECS) * 100.0
    }
}
