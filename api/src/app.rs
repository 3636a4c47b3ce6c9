//! Application state and factory
//!
//! Builds the actix-web application shared by `main` and the integration
//! tests, so both exercise the same middleware stack.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};
use pv_core::services::{RateLimiterTrait, VerificationGateway, VerificationProvider};
use pv_shared::AppConfig;
use std::sync::Arc;

use crate::handlers::{json_error_handler, not_found};
use crate::middleware::{create_cors, RateLimit, SecurityHeaders};
use crate::routes::health::health_check;
use crate::routes::verification::{check_verification, start_verification};

/// Application state that holds shared services
pub struct AppState<P: VerificationProvider> {
    pub gateway: VerificationGateway<P>,
}

impl<P: VerificationProvider> AppState<P> {
    pub fn new(gateway: VerificationGateway<P>) -> Self {
        Self { gateway }
    }
}

/// Create and configure the application with all dependencies
///
/// `tls_active` controls whether HSTS is sent.
pub fn create_app<P, R>(
    app_state: web::Data<AppState<P>>,
    rate_limiter: Arc<R>,
    config: &AppConfig,
    tls_active: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    P: VerificationProvider + 'static,
    R: RateLimiterTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Last wrap is outermost; CORS-generated responses still get security headers
        .wrap(Logger::default())
        .wrap(create_cors(&config.cors))
        .wrap(SecurityHeaders::new(tls_active))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .wrap(RateLimit::new(rate_limiter, &config.rate_limit))
                .route("/start-verification", web::post().to(start_verification::<P>))
                .route("/check-verification", web::post().to(check_verification::<P>)),
        )
        .default_service(web::route().to(not_found))
}
