//! Verification route handlers
//!
//! - `POST /api/start-verification` asks the provider to send a code
//! - `POST /api/check-verification` asks the provider whether a code matches
//!
//! Both relay the provider status verbatim as `{"status": "..."}`.

pub mod check;
pub mod start;

pub use check::check_verification;
pub use start::start_verification;

use pv_core::errors::DomainError;
use uuid::Uuid;

/// Log a failed call at a level matching who is at fault
fn log_failure(request_id: &Uuid, endpoint: &str, error: &DomainError) {
    match error {
        DomainError::Provider(e) => {
            log::error!("[{}] {} provider failure: {}", request_id, endpoint, e)
        }
        other => log::warn!("[{}] {} rejected: {}", request_id, endpoint, other),
    }
}
