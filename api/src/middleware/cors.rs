//! CORS middleware configuration for cross-origin requests.
//!
//! Exactly one frontend origin may call the API, and only with `POST` and a
//! `Content-Type` header. The rate-limit headers are exposed so the browser
//! client can read them.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use pv_shared::CorsConfig;

/// Creates a CORS middleware instance for the configured frontend origin.
pub fn create_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring CORS for origin {}", config.allowed_origin);

    let cors = Cors::default()
        .allowed_origin(&config.allowed_origin)
        .allowed_methods(vec![Method::POST])
        .allowed_headers(vec![header::CONTENT_TYPE])
        .expose_headers(vec![
            header::HeaderName::from_static("ratelimit-limit"),
            header::HeaderName::from_static("ratelimit-remaining"),
            header::HeaderName::from_static("ratelimit-reset"),
            header::RETRY_AFTER,
        ])
        .max_age(config.max_age);

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}
