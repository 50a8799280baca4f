//! JSON-RPC envelopes, method parameters and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Remote methods the gateway invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    PlayerSet,
    BankGroupSet,
    SessionCreate,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::PlayerSet => "Player.Set",
            Method::BankGroupSet => "BankGroup.Set",
            Method::SessionCreate => "Session.Create",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub id: u64,
    pub params: &'a P,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(method: Method, id: u64, params: &'a P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.as_str(),
            id,
            params,
        }
    }

    /// Serialize the envelope. Output depends only on (method, id, params).
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Error object returned by the platform in place of a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Response envelope as it arrives on the wire.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub jsonrpc: String,
    /// Null when the platform could not read the request's id.
    pub id: Option<u64>,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    /// Check correlation and unwrap the result.
    pub fn into_reply(self, method: Method, expected_id: u64, status: u16) -> PlatformResult<PlatformReply<T>> {
        if let Some(error) = self.error {
            return Err(PlatformError::Rpc {
                method,
                code: error.code,
                message: error.message,
            });
        }
        if self.id != Some(expected_id) {
            return Err(PlatformError::CorrelationMismatch {
                method,
                expected: expected_id,
                actual: self.id,
            });
        }
        match self.result {
            Some(result) => Ok(PlatformReply {
                jsonrpc: self.jsonrpc,
                id: expected_id,
                result,
            }),
            None => Err(PlatformError::EmptyResult { method, status }),
        }
    }
}

/// Successful platform response, returned to inbound callers as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformReply<T> {
    pub jsonrpc: String,
    pub id: u64,
    pub result: T,
}

/// `Player.Set` parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerParams {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Nick", skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(rename = "BankGroupId", skip_serializing_if = "Option::is_none")]
    pub bank_group_id: Option<String>,
}

/// `BankGroup.Set` parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankGroupParams {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Currency")]
    pub currency: String,
}

/// `Session.Create` parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionParams {
    #[serde(rename = "PlayerId")]
    pub player_id: String,
    #[serde(rename = "GameId")]
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "sessionUrl")]
    pub session_url: String,
}

pub type PlayerCreationResult = PlatformReply<Vec<String>>;
pub type BankGroupCreationResult = PlatformReply<Vec<String>>;
pub type SessionCreationResult = PlatformReply<Vec<SessionResult>>;

impl PlayerCreationResult {
    /// Identity the platform assigned, if it reported one.
    pub fn assigned_id(&self) -> Option<&str> {
        self.result.first().map(String::as_str).filter(|id| !id.is_empty())
    }
}

/// Errors that can occur during a platform call.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{method}: failed to encode request: {source}")]
    Encoding {
        method: Method,
        #[source]
        source: serde_json::Error,
    },

    #[error("{method}: request to platform failed: {source}")]
    Transport {
        method: Method,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method}: unable to decode response, status code {status}: {source}")]
    Decoding {
        method: Method,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("{method}: response has neither result nor error, status code {status}")]
    EmptyResult { method: Method, status: u16 },

    #[error("{method}: platform returned error {code}: {message}")]
    Rpc {
        method: Method,
        code: i64,
        message: String,
    },

    #[error("{method}: response id {} does not match request id {expected}", display_id(.actual))]
    CorrelationMismatch {
        method: Method,
        expected: u64,
        actual: Option<u64>,
    },
}

fn display_id(id: &Option<u64>) -> String {
    id.map_or_else(|| "null".to_string(), |id| id.to_string())
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
