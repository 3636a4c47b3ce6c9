//! Configuration module with sub-modules per concern
//!
//! - `environment` - Environment detection and logging configuration
//! - `provider` - External verification provider credentials and limits
//! - `rate_limit` - Per-address request governor for the API
//! - `server` - HTTP server, CORS, and TLS configuration

pub mod environment;
pub mod provider;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};
use std::env;

pub use environment::{Environment, LoggingConfig};
pub use provider::{ProviderConfig, ProviderKind};
pub use rate_limit::RateLimitConfig;
pub use server::{CorsConfig, ServerConfig, TlsConfig};

/// Errors raised while assembling configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults for a given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Default::default()
        }
    }

    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// Sources, lowest precedence first: built-in defaults, the optional
    /// per-environment TOML file, `PV__SECTION__KEY` variables, then the
    /// well-known deployment variables (`PORT`, `TWILIO_*`, ...).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_for(Environment::from_env())
    }

    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::for_environment(environment);

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix("PV")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;
        app_config.environment = environment;
        app_config.apply_env_overrides();
        app_config.provider.validate()?;
        Ok(app_config)
    }

    /// Environment variables that predate the `PV__` scheme always win
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("PORT") {
            if let Ok(port) = v.parse() {
                self.server.port = port;
            }
        }
        if let Ok(v) = env::var("FRONTEND_ORIGIN") {
            self.cors.allowed_origin = v;
        }
        if let Ok(v) = env::var("TWILIO_ACCOUNT_SID") {
            self.provider.account_sid = v;
        }
        if let Ok(v) = env::var("TWILIO_AUTH_TOKEN") {
            self.provider.auth_token = v;
        }
        if let Ok(v) = env::var("TWILIO_VERIFY_SERVICE_SID") {
            self.provider.verify_service_sid = v;
        }
        match (env::var("TLS_CERT_PATH"), env::var("TLS_KEY_PATH")) {
            (Ok(cert_path), Ok(key_path)) => {
                self.server.tls = Some(TlsConfig { cert_path, key_path });
            }
            (Ok(cert_path), Err(_)) => {
                self.server.tls.get_or_insert_with(TlsConfig::default).cert_path = cert_path;
            }
            (Err(_), Ok(key_path)) => {
                self.server.tls.get_or_insert_with(TlsConfig::default).key_path = key_path;
            }
            (Err(_), Err(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::for_environment(Environment::Production);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.rate_limit.max_requests, 15);
        assert_eq!(config.cors.allowed_origin, "http://localhost:5173");
        assert_eq!(config.provider.kind, ProviderKind::Twilio);
    }

    #[test]
    fn test_load_with_prefixed_overrides() {
        env::set_var("PV__PROVIDER__KIND", "mock");
        env::set_var("PV__RATE_LIMIT__MAX_REQUESTS", "40");

        let config = AppConfig::load_for(Environment::Staging).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Mock);
        assert_eq!(config.rate_limit.max_requests, 40);
        assert_eq!(config.environment, Environment::Staging);

        env::remove_var("PV__PROVIDER__KIND");
        env::remove_var("PV__RATE_LIMIT__MAX_REQUESTS");
    }
}
