//! Domain entities for the verification flow.

pub mod session;
pub mod verification;

#[cfg(test)]
mod tests;

pub use session::{GatewayReply, Session, Step, SubmitError, COUNTDOWN_SECS};
pub use verification::{
    Channel, PhoneNumber, VerificationCode, VerificationRequest, VerificationStatus,
    APPROVED_STATUS, CLIENT_CODE_MAX_LENGTH, CODE_MIN_LENGTH, GATEWAY_CODE_MAX_LENGTH,
};
