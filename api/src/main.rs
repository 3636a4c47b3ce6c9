use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};
use pv_api::{create_app, tls::load_rustls_config, AppState};
use pv_core::services::{
    InMemoryRateLimiter, VerificationGateway, VerificationProvider, VerificationServiceConfig,
};
use pv_infra::create_provider;
use pv_shared::AppConfig;
use std::{sync::Arc, time::Duration};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Reads .env before anything else looks at the environment
    let config = AppConfig::load().context("failed to load configuration")?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!(
        "Starting PhoneVerify API ({} environment)",
        config.environment
    );

    let provider = create_provider(&config.provider).context("failed to create provider")?;
    info!("Verification provider: {}", provider.provider_name());

    let gateway = VerificationGateway::new(
        Arc::new(provider),
        VerificationServiceConfig::from_provider_config(&config.provider),
    );
    let state = web::Data::new(AppState::new(gateway));

    let rate_limiter = Arc::new(InMemoryRateLimiter::from_config(&config.rate_limit));
    spawn_purge_task(
        Arc::clone(&rate_limiter),
        Duration::from_secs(config.rate_limit.purge_interval_secs.max(1)),
    );

    let tls = match config.server.tls_if_available() {
        Some(tls) => Some(load_rustls_config(tls).context("failed to load TLS configuration")?),
        None => {
            warn!("TLS certificate or key not found; serving plain HTTP");
            None
        }
    };
    let tls_active = tls.is_some();

    let bind_address = config.server.bind_address();
    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        create_app(
            state.clone(),
            Arc::clone(&rate_limiter),
            &app_config,
            tls_active,
        )
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let server = match tls {
        Some(tls_config) => {
            info!("Listening on https://{}", bind_address);
            server.bind_rustls_0_23(&bind_address, tls_config)?
        }
        None => {
            info!("Listening on http://{}", bind_address);
            server.bind(&bind_address)?
        }
    };

    server.run().await?;
    Ok(())
}

/// Periodically drop rate-limit windows that have ended
fn spawn_purge_task(limiter: Arc<InMemoryRateLimiter>, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut ticker = actix_web::rt::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = limiter.purge_expired();
            if purged > 0 {
                log::debug!(
                    "Purged {} expired rate-limit windows, {} still tracked",
                    purged,
                    limiter.tracked_keys()
                );
            }
        }
    });
}
