//! Server configuration module

use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Maximum JSON payload size in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,

    /// TLS configuration, used only when both files exist on disk
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
            max_payload_size: default_max_payload_size(),
            tls: Some(TlsConfig::default()),
        }
    }
}

impl ServerConfig {
    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// TLS settings whose certificate and key are both present on disk
    pub fn tls_if_available(&self) -> Option<&TlsConfig> {
        self.tls.as_ref().filter(|tls| tls.files_exist())
    }
}

/// TLS/SSL configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to PEM certificate chain
    pub cert_path: String,

    /// Path to PEM private key
    pub key_path: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: String::from("certs/server.crt"),
            key_path: String::from("certs/server.key"),
        }
    }
}

impl TlsConfig {
    /// Whether both the certificate and the key exist as regular files
    pub fn files_exist(&self) -> bool {
        Path::new(&self.cert_path).is_file() && Path::new(&self.key_path).is_file()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// The single frontend origin allowed to call the API
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Allow credentials
    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
            allow_credentials: default_allow_credentials(),
            max_age: default_max_age(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

fn default_port() -> u16 {
    3000
}

fn default_max_payload_size() -> usize {
    16 * 1024 // 16 KB, requests carry two short strings
}

fn default_allowed_origin() -> String {
    String::from("http://localhost:5173")
}

fn default_allow_credentials() -> bool {
    true
}

fn default_max_age() -> usize {
    3600
}
