//! In-memory balance store.
//!
//! Same semantics as the PostgreSQL store: unique identities, `NotFound` on
//! zero matching rows. Used for tests and database-less local runs.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::observability::metrics;
use crate::store::types::{BalanceStore, NewPlayer, Player, StoreError, StoreResult};

#[derive(Clone, Default)]
pub struct MemoryBalanceStore {
    players: Arc<DashMap<String, Player>>,
}

impl MemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[async_trait]
impl BalanceStore for MemoryBalanceStore {
    async fn create_player(&self, player: &NewPlayer) -> StoreResult<()> {
        match self.players.entry(player.id.clone()) {
            Entry::Occupied(_) => {
                metrics::record_store_op("create_player", "conflict");
                Err(StoreError::Conflict {
                    id: player.id.clone(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(player.clone().into());
                metrics::record_store_op("create_player", "ok");
                tracing::info!(player_id = %player.id, "Player inserted");
                Ok(())
            }
        }
    }

    async fn get_player(&self, id: &str) -> StoreResult<Player> {
        match self.players.get(id) {
            Some(entry) => {
                metrics::record_store_op("get_player", "ok");
                Ok(entry.value().clone())
            }
            None => {
                metrics::record_store_op("get_player", "not_found");
                Err(StoreError::NotFound { id: id.to_string() })
            }
        }
    }

    async fn update_balance(&self, id: &str, balance: f64) -> StoreResult<()> {
        match self.players.get_mut(id) {
            Some(mut entry) => {
                entry.balance = balance;
                metrics::record_store_op("update_balance", "ok");
                Ok(())
            }
            None => {
                metrics::record_store_op("update_balance", "not_found");
                Err(StoreError::NotFound { id: id.to_string() })
            }
        }
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get_returns_balance() {
        let store = MemoryBalanceStore::new();
        store.create_player(&NewPlayer::new("42", 100.0)).await.unwrap();

        let player = store.get_player("42").await.unwrap();
        assert_eq!(player.balance, 100.0);
        assert!(player.nick_name.is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_player() {
        let store = MemoryBalanceStore::new();
        let err = store.get_player("999").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_identity_conflicts() {
        let store = MemoryBalanceStore::new();
        store.create_player(&NewPlayer::new("7", 1.0)).await.unwrap();

        let err = store.create_player(&NewPlayer::new("7", 2.0)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(store.get_player("7").await.unwrap().balance, 1.0);
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let store = MemoryBalanceStore::new();
        store.create_player(&NewPlayer::new("42", 100.0)).await.unwrap();
        store.update_balance("42", 250.5).await.unwrap();

        assert_eq!(store.get_player("42").await.unwrap().balance, 250.5);
    }

    #[tokio::test]
    async fn test_update_unknown_player() {
        let store = MemoryBalanceStore::new();
        let err = store.update_balance("missing", 10.0).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_optional_fields_persisted() {
        let store = MemoryBalanceStore::new();
        let mut new = NewPlayer::new("p1", 5.0);
        new.nick_name = Some("Noname".to_string());
        new.bank_group_id = Some("new_bank_group".to_string());
        store.create_player(&new).await.unwrap();

        let player = store.get_player("p1").await.unwrap();
        assert_eq!(player.bank_group_id.as_deref(), Some("new_bank_group"));
        assert_eq!(store.len(), 1);
    }
}
