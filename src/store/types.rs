//! Player records, the store trait and its error type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted player row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub nick_name: Option<String>,
    pub bank_group_id: Option<String>,
    pub balance: f64,
}

/// Data for a row about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub id: String,
    pub nick_name: Option<String>,
    pub bank_group_id: Option<String>,
    pub balance: f64,
}

impl NewPlayer {
    pub fn new(id: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            nick_name: None,
            bank_group_id: None,
            balance,
        }
    }
}

impl From<NewPlayer> for Player {
    fn from(new: NewPlayer) -> Self {
        Self {
            id: new.id,
            nick_name: new.nick_name,
            bank_group_id: new.bank_group_id,
            balance: new.balance,
        }
    }
}

/// Errors that can occur in the balance store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No pooled connection could be obtained.
    #[error("unable to acquire database connection during {op}: {message}")]
    Connection { op: &'static str, message: String },

    #[error("player {id} already exists")]
    Conflict { id: String },

    #[error("player {id} not found")]
    NotFound { id: String },

    #[error("{op} failed for player {id}: {source}")]
    Query {
        op: &'static str,
        id: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("schema setup failed: {0}")]
    Schema(#[source] tokio_postgres::Error),

    #[error("unable to create connection pool: {0}")]
    Pool(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for player balances.
///
/// Every operation is a single auto-committed statement.
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Insert a new player. Fails with `Conflict` if the identity exists.
    async fn create_player(&self, player: &NewPlayer) -> StoreResult<()>;

    /// Fetch exactly one player by identity.
    async fn get_player(&self, id: &str) -> StoreResult<Player>;

    /// Overwrite a player's balance. Fails with `NotFound` if no row matched.
    async fn update_balance(&self, id: &str, balance: f64) -> StoreResult<()>;

    /// Create the backing tables if absent. Safe to call repeatedly.
    async fn ensure_schema(&self) -> StoreResult<()>;
}
