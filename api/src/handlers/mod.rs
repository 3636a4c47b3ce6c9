//! Request handlers shared across routes

pub mod error;

pub use error::{json_error_handler, not_found, ApiError};
