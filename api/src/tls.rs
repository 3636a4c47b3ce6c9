//! TLS bootstrap
//!
//! Loads a PEM certificate chain and private key into a rustls server
//! configuration for `HttpServer::bind_rustls_0_23`.

use anyhow::{anyhow, Context};
use pv_shared::TlsConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::{fs::File, io::BufReader, sync::Arc};

/// Build a rustls server configuration from the configured PEM files
pub fn load_rustls_config(config: &TlsConfig) -> anyhow::Result<rustls::ServerConfig> {
    let certs = load_certs(&config.cert_path)?;
    let key = load_private_key(&config.key_path)?;

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .context("no usable TLS protocol versions")?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("certificate and private key do not match")
}

fn load_certs(path: &str) -> anyhow::Result<Vec<CertificateDer<'static>>> {
    let file = File::open(path).with_context(|| format!("cannot open certificate {}", path))?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("cannot parse certificate {}", path))?;

    if certs.is_empty() {
        return Err(anyhow!("no certificates found in {}", path));
    }
    Ok(certs)
}

fn load_private_key(path: &str) -> anyhow::Result<PrivateKeyDer<'static>> {
    let file = File::open(path).with_context(|| format!("cannot open private key {}", path))?;
    rustls_pemfile::private_key(&mut BufReader::new(file))
        .with_context(|| format!("cannot parse private key {}", path))?
        .ok_or_else(|| anyhow!("no private key found in {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pv_api_tls_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_files_are_reported() {
        let config = TlsConfig {
            cert_path: "does/not/exist.crt".to_string(),
            key_path: "does/not/exist.key".to_string(),
        };
        let err = load_rustls_config(&config).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.crt"));
    }

    #[test]
    fn test_file_without_certificates_is_rejected() {
        let cert = temp_file("empty.crt", "not a pem file\n");
        let key = temp_file("empty.key", "");
        let config = TlsConfig {
            cert_path: cert.to_string_lossy().into_owned(),
            key_path: key.to_string_lossy().into_owned(),
        };

        let err = load_rustls_config(&config).unwrap_err();
        assert!(err.to_string().contains("no certificates found"));

        std::fs::remove_file(cert).ok();
        std::fs::remove_file(key).ok();
    }
}
