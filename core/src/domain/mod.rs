//! Domain layer: validated request types and the client session.

pub mod entities;

pub use entities::session;
pub use entities::{
    Channel, GatewayReply, PhoneNumber, Session, Step, SubmitError, VerificationCode,
    VerificationRequest, VerificationStatus, APPROVED_STATUS, CLIENT_CODE_MAX_LENGTH,
    CODE_MIN_LENGTH, COUNTDOWN_SECS, GATEWAY_CODE_MAX_LENGTH,
};
