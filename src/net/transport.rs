//! Secure transport for outbound platform calls.
//!
//! # Responsibilities
//! - Read CA bundle and/or client identity from disk
//! - Build a single `reqwest::Client` that speaks (mutual) TLS
//! - Bound every platform round trip with the configured timeout
//!
//! # Design Decisions
//! - Built once at startup; the client is cheap to clone and shared read-only
//! - Construction never touches the network
//! - No retry or reconnection logic

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::PlatformConfig;
use crate::net::tls::TlsMaterial;

/// Errors raised while assembling the platform HTTP client.
#[derive(Debug, Error)]
pub enum TransportConfigError {
    #[error("unable to read TLS material at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed PEM in {}: {source}", path.display())]
    Pem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificates found in {}", path.display())]
    NoCertificates { path: PathBuf },

    #[error("no private key found in {}", path.display())]
    NoPrivateKey { path: PathBuf },

    #[error("no CA bundle or client identity configured")]
    MissingMaterial,

    #[error("failed to build platform HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

pub type TransportResult<T> = Result<T, TransportConfigError>;

/// Builder for the shared platform HTTP client.
pub struct SecureTransport;

impl SecureTransport {
    /// Build the client described by the platform configuration.
    pub fn build(config: &PlatformConfig) -> TransportResult<reqwest::Client> {
        let material = TlsMaterial::from_config(&config.tls)?;
        Self::from_material(
            material,
            Duration::from_secs(config.request_timeout_secs),
            config.tls.accept_invalid_certs,
        )
    }

    /// Build a client from material that has already been loaded.
    pub fn from_material(
        material: TlsMaterial,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> TransportResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs);

        for der in &material.ca_certs {
            let cert = reqwest::Certificate::from_der(der).map_err(TransportConfigError::Build)?;
            builder = builder.add_root_certificate(cert);
        }

        if let Some(pem) = &material.identity_pem {
            let identity = reqwest::Identity::from_pem(pem).map_err(TransportConfigError::Build)?;
            builder = builder.identity(identity);
        }

        let client = builder.build().map_err(TransportConfigError::Build)?;

        tracing::info!(
            ca_certs = material.ca_certs.len(),
            mutual_tls = material.identity_pem.is_some(),
            timeout_secs = timeout.as_secs(),
            accept_invalid_certs,
            "Platform transport initialized"
        );

        Ok(client)
    }
}
