//! Synchronization handlers.
//!
//! Each handler branches on the outcome of its platform and store calls
//! before building a response. Creation flows run on a spawned task so a
//! caller hanging up does not cut a platform call short.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::{ApiError, MessageResponse};
use crate::http::server::AppState;
use crate::platform::{
    BankGroupCreationResult, BankGroupParams, PlayerCreationResult, PlayerParams,
    SessionCreationResult, SessionParams,
};
use crate::platform::types::JSONRPC_VERSION;
use crate::store::NewPlayer;

/// Body of `POST /create_player`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreatePlayerRequest {
    pub player_id: Option<String>,
    pub nick: Option<String>,
    pub bank_group_id: Option<String>,
    pub balance: Option<f64>,
}

/// Body of `POST /create_bank_group`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateBankGroupRequest {
    pub bank_group_id: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub player_id: String,
    pub game_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBalanceRequest {
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub balance: f64,
}

/// JSON-RPC-shaped balance reply for the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub jsonrpc: String,
    pub id: String,
    pub result: BalanceResult,
}

impl BalanceResponse {
    pub fn new(id: String, balance: f64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: BalanceResult { balance },
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))
}

/// An empty body means "use defaults".
fn parse_optional_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    parse_body(body)
}

fn non_empty(field: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ApiError::Validation(format!("{field} must not be empty"))),
        other => Ok(other),
    }
}

fn required(field: &str, value: String) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
        format!("This api version: {}", state.api_version),
    )
}

pub async fn get_player_balance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let player = state.store.get_player(&id).await?;
    Ok(Json(BalanceResponse::new(id, player.balance)))
}

pub async fn update_player_balance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let request: UpdateBalanceRequest = parse_body(&body)?;
    state.store.update_balance(&id, request.balance).await?;
    Ok(Json(MessageResponse::new("balance updated")))
}

pub async fn create_player(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlayerCreationResult>, ApiError> {
    let request: CreatePlayerRequest = parse_optional_body(&body)?;
    let params = PlayerParams {
        id: non_empty("player_id", request.player_id)?.unwrap_or_else(|| Uuid::new_v4().to_string()),
        nick: non_empty("nick", request.nick)?,
        bank_group_id: non_empty("bank_group_id", request.bank_group_id)?,
    };
    let balance = request.balance.unwrap_or(state.default_balance);

    let reply = tokio::spawn(sync_new_player(state, params, balance)).await??;
    Ok(Json(reply))
}

/// Register the player on the platform, then persist it under the identity
/// the platform reported. Storage is untouched if the platform call fails.
async fn sync_new_player(
    state: AppState,
    params: PlayerParams,
    balance: f64,
) -> Result<PlayerCreationResult, ApiError> {
    let reply = state.platform.create_player(&params).await?;

    let player_id = reply.assigned_id().unwrap_or(&params.id).to_string();
    tracing::info!(requested_id = %params.id, player_id = %player_id, "Player created on platform");

    let new_player = NewPlayer {
        id: player_id,
        nick_name: params.nick,
        bank_group_id: params.bank_group_id,
        balance,
    };
    state.store.create_player(&new_player).await?;
    Ok(reply)
}

pub async fn create_bank_group(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BankGroupCreationResult>, ApiError> {
    let request: CreateBankGroupRequest = parse_optional_body(&body)?;
    let params = BankGroupParams {
        id: non_empty("bank_group_id", request.bank_group_id)?.unwrap_or_else(|| Uuid::new_v4().to_string()),
        currency: non_empty("currency", request.currency)?.unwrap_or_else(|| state.default_currency.to_string()),
    };

    let platform = state.platform.clone();
    let reply = tokio::spawn(async move { platform.create_bank_group(&params).await }).await??;
    tracing::info!(id = reply.id, "Bank group created on platform");
    Ok(Json(reply))
}

pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionCreationResult>, ApiError> {
    let request: CreateSessionRequest = parse_body(&body)?;
    let params = SessionParams {
        player_id: required("player_id", request.player_id)?,
        game_id: required("game_id", request.game_id)?,
    };

    let platform = state.platform.clone();
    let reply = tokio::spawn(async move { platform.create_session(&params).await }).await??;
    tracing::info!(id = reply.id, sessions = reply.result.len(), "Session created on platform");
    Ok(Json(reply))
}
