//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size > 0)
//! - Check that TLS material is configured coherently
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, StoreBackend};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    match url::Url::parse(&config.platform.url) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => {}
        Ok(url) => errors.push(ValidationError::new(
            "platform.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "platform.url",
            format!("'{}' is not a valid URL: {}", config.platform.url, e),
        )),
    }

    if config.platform.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "platform.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    let tls = &config.platform.tls;
    match (&tls.cert_path, &tls.key_path) {
        (Some(_), None) => errors.push(ValidationError::new(
            "platform.tls.key_path",
            "required when cert_path is set",
        )),
        (None, Some(_)) => errors.push(ValidationError::new(
            "platform.tls.cert_path",
            "required when key_path is set",
        )),
        _ => {}
    }
    if tls.ca_path.is_none() && tls.cert_path.is_none() && tls.key_path.is_none() {
        errors.push(ValidationError::new(
            "platform.tls",
            "either ca_path or cert_path/key_path must be set",
        ));
    }

    if config.database.backend == StoreBackend::Postgres {
        if config.database.name.is_empty() {
            errors.push(ValidationError::new("database.name", "must not be empty"));
        }
        if config.database.host.is_empty() {
            errors.push(ValidationError::new("database.host", "must not be empty"));
        }
        if config.database.user.is_empty() {
            errors.push(ValidationError::new("database.user", "must not be empty"));
        }
        if config.database.max_connections == 0 {
            errors.push(ValidationError::new(
                "database.max_connections",
                "must be greater than zero",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
