//! Terminal client for the phone verification flow.
//!
//! The session state machine lives in `pv_core`; this crate drives it:
//! - [`gateway`] talks to the HTTP gateway
//! - [`countdown`] runs the cancellable one-second timer
//! - [`controller`] owns the session and enforces one request in flight
//! - [`render`] turns a session into something to show

pub mod controller;
pub mod countdown;
pub mod gateway;
pub mod render;

pub use controller::SessionController;
pub use countdown::{Countdown, CountdownHandle};
pub use gateway::{GatewayClient, VerificationApi};
pub use render::{render_text, View};

/// Client-side error types
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway URL is unusable
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),
}
