//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Inbound handler settings.
    pub handler: HandlerConfig,

    /// Balance store connection settings.
    pub database: DatabaseConfig,

    /// Remote platform endpoint and TLS material.
    pub platform: PlatformConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Reported by `GET /`.
    pub api_version: String,

    /// Initial balance for players created without an explicit one.
    pub default_balance: f64,

    /// Maximum inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            api_version: env!("CARGO_PKG_VERSION").to_string(),
            default_balance: 0.0,
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Which balance store implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// Database connection parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,

    /// Upper bound on pooled connections.
    pub max_connections: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            name: "gaming".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            max_connections: 16,
        }
    }
}

/// Remote platform configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Total time allowed for one platform round trip.
    pub request_timeout_secs: u64,

    /// Currency used for bank groups created without one.
    pub default_currency: String,

    pub tls: PlatformTlsConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost:8443".to_string(),
            request_timeout_secs: 60,
            default_currency: "EUR".to_string(),
            tls: PlatformTlsConfig::default(),
        }
    }
}

/// TLS material presented to and trusted for the platform.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PlatformTlsConfig {
    /// CA bundle (PEM) used to verify the platform's certificate.
    pub ca_path: Option<String>,

    /// Client certificate (PEM) for mutual TLS.
    pub cert_path: Option<String>,

    /// Client private key (PEM) for mutual TLS.
    pub key_path: Option<String>,

    /// Skip server certificate verification. Test platforms only.
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
