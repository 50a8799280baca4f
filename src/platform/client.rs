//! Platform JSON-RPC client.
//!
//! # Responsibilities
//! - Build request envelopes with a fresh correlation id per call
//! - POST them over the shared secure transport
//! - Decode typed replies and check they echo the request id

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::observability::metrics;
use crate::platform::types::{
    BankGroupCreationResult, BankGroupParams, Method, PlatformError, PlatformReply, PlatformResult,
    PlayerCreationResult, PlayerParams, RpcRequest, RpcResponse, SessionCreationResult,
    SessionParams,
};

/// Operations the gateway performs against the platform.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn create_player(&self, params: &PlayerParams) -> PlatformResult<PlayerCreationResult>;

    async fn create_bank_group(&self, params: &BankGroupParams) -> PlatformResult<BankGroupCreationResult>;

    async fn create_session(&self, params: &SessionParams) -> PlatformResult<SessionCreationResult>;
}

/// JSON-RPC client for the remote platform.
pub struct PlatformClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl PlatformClient {
    /// Create a client whose correlation ids start at a random point.
    ///
    /// Ids stay below 2^53 so platforms parsing them as doubles see exact values.
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self::with_first_id(http, url, fastrand::u64(1..=u64::from(u32::MAX)))
    }

    pub fn with_first_id(http: reqwest::Client, url: impl Into<String>, first_id: u64) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(first_id),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call<P, T>(&self, method: Method, params: &P) -> PlatformResult<PlatformReply<T>>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let result = self.round_trip(method, params).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(PlatformError::Rpc { .. }) => "rpc_error",
            Err(_) => "failed",
        };
        metrics::record_platform_call(method.as_str(), outcome, start);
        result
    }

    async fn round_trip<P, T>(&self, method: Method, params: &P) -> PlatformResult<PlatformReply<T>>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let id = self.next_id();
        let body = RpcRequest::new(method, id, params)
            .to_bytes()
            .map_err(|source| PlatformError::Encoding { method, source })?;

        tracing::debug!(method = %method, id, url = %self.url, "Sending platform request");

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| PlatformError::Transport { method, source })?;

        let status = response.status().as_u16();
        // The body is read to completion here, so the connection is released
        // whether or not decoding succeeds.
        let bytes = response
            .bytes()
            .await
            .map_err(|source| PlatformError::Transport { method, source })?;

        let decoded: RpcResponse<T> = serde_json::from_slice(&bytes)
            .map_err(|source| PlatformError::Decoding { method, status, source })?;

        let reply = decoded.into_reply(method, id, status)?;
        tracing::info!(method = %method, id, status, "Platform request completed");
        Ok(reply)
    }
}

#[async_trait]
impl PlatformApi for PlatformClient {
    async fn create_player(&self, params: &PlayerParams) -> PlatformResult<PlayerCreationResult> {
        tracing::info!(player_id = %params.id, "Creating player on platform");
        self.call(Method::PlayerSet, params).await
    }

    async fn create_bank_group(&self, params: &BankGroupParams) -> PlatformResult<BankGroupCreationResult> {
        tracing::info!(bank_group_id = %params.id, currency = %params.currency, "Creating bank group on platform");
        self.call(Method::BankGroupSet, params).await
    }

    async fn create_session(&self, params: &SessionParams) -> PlatformResult<SessionCreationResult> {
        tracing::info!(player_id = %params.player_id, game_id = %params.game_id, "Creating session on platform");
        self.call(Method::SessionCreate, params).await
    }
}

impl std::fmt::Debug for PlatformClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformClient")
            .field("url", &self.url)
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let client = PlatformClient::with_first_id(reqwest::Client::new(), "http://127.0.0.1:1", 10);
        assert_eq!(client.next_id(), 10);
        assert_eq!(client.next_id(), 11);
        assert_eq!(client.next_id(), 12);
    }

    #[test]
    fn test_random_seed_in_range() {
        let client = PlatformClient::new(reqwest::Client::new(), "http://127.0.0.1:1");
        let id = client.next_id();
        assert!(id >= 1 && id <= u64::from(u32::MAX));
    }

    #[tokio::test]
    async fn test_unreachable_platform_is_transport_error() {
        // Port 1 on loopback refuses connections.
        let client = PlatformClient::with_first_id(reqwest::Client::new(), "http://127.0.0.1:1/rpc", 1);
        let params = BankGroupParams {
            id: "bg".to_string(),
            currency: "EUR".to_string(),
        };

        let err = client.create_bank_group(&params).await.unwrap_err();
        assert!(matches!(err, PlatformError::Transport { method: Method::BankGroupSet, .. }));
    }
}
