//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the secure transport and platform client
//! - Open the balance store and make sure its tables exist
//! - Assemble the shared `AppState`
//!
//! # Design Decisions
//! - Fail fast: bad TLS material or an unreachable database stops startup
//! - Dependencies initialize in order, not concurrently

use std::sync::Arc;

use thiserror::Error;

use crate::config::{GatewayConfig, StoreBackend};
use crate::http::AppState;
use crate::net::{SecureTransport, TransportConfigError};
use crate::platform::{PlatformApi, PlatformClient};
use crate::store::{BalanceStore, MemoryBalanceStore, PgBalanceStore, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("platform transport: {0}")]
    Transport(#[from] TransportConfigError),

    #[error("balance store: {0}")]
    Store(#[from] StoreError),
}

/// Open the balance store selected by configuration and ensure its schema.
pub async fn open_store(config: &GatewayConfig) -> Result<Arc<dyn BalanceStore>, StoreError> {
    let store: Arc<dyn BalanceStore> = match config.database.backend {
        StoreBackend::Postgres => {
            tracing::info!(database = %config.database.name, "Connecting to the database");
            Arc::new(PgBalanceStore::connect(&config.database)?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory balance store; balances are lost on restart");
            Arc::new(MemoryBalanceStore::new())
        }
    };

    store.ensure_schema().await?;
    Ok(store)
}

/// Build every shared dependency the handlers need.
pub async fn build_state(config: &GatewayConfig) -> Result<AppState, StartupError> {
    let http = SecureTransport::build(&config.platform)?;
    let platform: Arc<dyn PlatformApi> = Arc::new(PlatformClient::new(http, config.platform.url.clone()));
    tracing::info!(url = %config.platform.url, "Platform client ready");

    let store = open_store(config).await?;

    Ok(AppState::new(config, platform, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewPlayer;

    #[tokio::test]
    async fn test_memory_backend_opens() {
        let mut config = GatewayConfig::default();
        config.database.backend = StoreBackend::Memory;

        let store = open_store(&config).await.unwrap();
        store.create_player(&NewPlayer::new("1", 1.0)).await.unwrap();
        assert_eq!(store.get_player("1").await.unwrap().balance, 1.0);
    }

    #[tokio::test]
    async fn test_bad_tls_material_stops_startup() {
        let mut config = GatewayConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.platform.tls.ca_path = Some("/nonexistent/ca.pem".to_string());

        let err = build_state(&config).await.err().unwrap();
        assert!(matches!(err, StartupError::Transport(TransportConfigError::Read { .. })));
    }
}
