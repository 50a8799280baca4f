//! PostgreSQL balance store backed by a deadpool connection pool.

use async_trait::async_trait;
use deadpool_postgres::{Config, Object, Pool, PoolConfig, Runtime};
use tokio_postgres::error::SqlState;
use tokio_postgres::NoTls;

use crate::config::DatabaseConfig;
use crate::observability::metrics;
use crate::store::queries;
use crate::store::types::{BalanceStore, NewPlayer, Player, StoreError, StoreResult};

pub struct PgBalanceStore {
    pool: Pool,
    database: String,
}

impl PgBalanceStore {
    /// Create a pool from discrete connection parameters.
    ///
    /// Connections are opened lazily, so this succeeds even if the server is down.
    pub fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let mut pg_config = Config::new();
        pg_config.host = Some(config.host.clone());
        pg_config.port = Some(config.port);
        pg_config.user = Some(config.user.clone());
        pg_config.password = Some(config.password.clone());
        pg_config.dbname = Some(config.name.clone());
        pg_config.pool = Some(PoolConfig::new(config.max_connections));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StoreError::Pool(e.to_string()))?;

        tracing::info!(
            database = %config.name,
            host = %config.host,
            port = config.port,
            max_connections = config.max_connections,
            "Database pool created"
        );

        Ok(Self {
            pool,
            database: config.name.clone(),
        })
    }

    /// Create a pool from a `postgres://` URL.
    pub fn from_url(url: &str, max_connections: usize) -> StoreResult<Self> {
        let mut pg_config = Config::new();
        pg_config.url = Some(url.to_string());
        pg_config.pool = Some(PoolConfig::new(max_connections));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StoreError::Pool(e.to_string()))?;

        Ok(Self {
            pool,
            database: url.rsplit('/').next().unwrap_or_default().to_string(),
        })
    }

    /// Borrow a pooled connection; it returns to the pool when dropped.
    async fn client(&self, op: &'static str) -> StoreResult<Object> {
        self.pool.get().await.map_err(|e| {
            metrics::record_store_op(op, "connection_error");
            StoreError::Connection {
                op,
                message: e.to_string(),
            }
        })
    }

    fn query_error(op: &'static str, id: &str, source: tokio_postgres::Error) -> StoreError {
        metrics::record_store_op(op, "error");
        StoreError::Query {
            op,
            id: id.to_string(),
            source,
        }
    }
}

#[async_trait]
impl BalanceStore for PgBalanceStore {
    async fn create_player(&self, player: &NewPlayer) -> StoreResult<()> {
        const OP: &str = "create_player";
        tracing::info!(player_id = %player.id, balance = player.balance, "Inserting player");

        let client = self.client(OP).await?;
        client
            .execute(
                queries::INSERT_PLAYER,
                &[&player.id, &player.nick_name, &player.bank_group_id, &player.balance],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    metrics::record_store_op(OP, "conflict");
                    StoreError::Conflict {
                        id: player.id.clone(),
                    }
                } else {
                    Self::query_error(OP, &player.id, e)
                }
            })?;

        metrics::record_store_op(OP, "ok");
        tracing::info!(player_id = %player.id, "Player inserted");
        Ok(())
    }

    async fn get_player(&self, id: &str) -> StoreResult<Player> {
        const OP: &str = "get_player";
        tracing::debug!(player_id = %id, "Reading player");

        let client = self.client(OP).await?;
        let row = client
            .query_opt(queries::SELECT_PLAYER_BY_ID, &[&id])
            .await
            .map_err(|e| Self::query_error(OP, id, e))?;

        let Some(row) = row else {
            metrics::record_store_op(OP, "not_found");
            return Err(StoreError::NotFound { id: id.to_string() });
        };

        metrics::record_store_op(OP, "ok");
        Ok(Player {
            id: row.get(0),
            nick_name: row.get(1),
            bank_group_id: row.get(2),
            balance: row.get(3),
        })
    }

    async fn update_balance(&self, id: &str, balance: f64) -> StoreResult<()> {
        const OP: &str = "update_balance";
        tracing::info!(player_id = %id, balance, "Updating player balance");

        let client = self.client(OP).await?;
        let affected = client
            .execute(queries::UPDATE_PLAYER_BALANCE, &[&balance, &id])
            .await
            .map_err(|e| Self::query_error(OP, id, e))?;

        if affected == 0 {
            metrics::record_store_op(OP, "not_found");
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        metrics::record_store_op(OP, "ok");
        tracing::info!(player_id = %id, "Player balance updated");
        Ok(())
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        tracing::info!(database = %self.database, "Ensuring tables exist");

        let client = self.client("ensure_schema").await?;
        client
            .batch_execute(queries::CREATE_TABLE_BANK_GROUP)
            .await
            .map_err(StoreError::Schema)?;
        client
            .batch_execute(queries::CREATE_TABLE_PLAYER)
            .await
            .map_err(StoreError::Schema)?;

        tracing::info!(database = %self.database, "Tables ready");
        Ok(())
    }
}
