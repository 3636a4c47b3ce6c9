pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::create_cors;
pub use rate_limit::{client_key, RateLimit};
pub use security::SecurityHeaders;
