//! Shared setup for the API integration tests

#![allow(dead_code)]

use actix_web::web;
use pv_api::AppState;
use pv_core::services::{InMemoryRateLimiter, VerificationGateway, VerificationServiceConfig};
use pv_infra::MockVerificationProvider;
use pv_shared::{AppConfig, ProviderConfig, RateLimitConfig};
use std::sync::Arc;

pub const VALID_PHONE: &str = "+14155552671";
pub const FRONTEND_ORIGIN: &str = "http://localhost:5173";

/// Configuration for tests: mock provider and default limits
pub fn test_config() -> AppConfig {
    AppConfig {
        provider: ProviderConfig::mock(),
        ..AppConfig::default()
    }
}

pub fn with_rate_limit(max_requests: u32, window_secs: u64) -> AppConfig {
    AppConfig {
        rate_limit: RateLimitConfig::new(max_requests, window_secs),
        ..test_config()
    }
}

/// Everything a test needs to build the app and inspect the provider
pub struct TestContext {
    pub provider: Arc<MockVerificationProvider>,
    pub state: web::Data<AppState<MockVerificationProvider>>,
    pub limiter: Arc<InMemoryRateLimiter>,
    pub config: AppConfig,
}

impl TestContext {
    pub fn new(config: AppConfig) -> Self {
        let provider = Arc::new(MockVerificationProvider::new());
        let gateway = VerificationGateway::new(
            Arc::clone(&provider),
            VerificationServiceConfig::from_provider_config(&config.provider),
        );
        Self {
            provider,
            state: web::Data::new(AppState::new(gateway)),
            limiter: Arc::new(InMemoryRateLimiter::from_config(&config.rate_limit)),
            config,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(test_config())
    }
}

/// Build the full application, middleware included
macro_rules! init_app {
    ($ctx:expr) => {
        init_app!($ctx, false)
    };
    ($ctx:expr, $tls:expr) => {
        actix_web::test::init_service(pv_api::create_app(
            $ctx.state.clone(),
            std::sync::Arc::clone(&$ctx.limiter),
            &$ctx.config,
            $tls,
        ))
        .await
    };
}
