//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Per-source-address request governor settings for `/api/*`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum requests per source address per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Key on the first `X-Forwarded-For` hop instead of the peer address
    #[serde(default)]
    pub trust_proxy: bool,

    /// How often expired windows are swept, in seconds
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            trust_proxy: false,
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Create a rate limit configuration with a custom budget
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            ..Default::default()
        }
    }

    /// Window length as a `Duration`
    pub fn window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.window_secs)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_requests() -> u32 {
    15
}

fn default_window_secs() -> u64 {
    15 * 60
}

fn default_purge_interval_secs() -> u64 {
    60
}
