//! Shared utilities for integration testing: a scriptable JSON-RPC platform
//! and an in-process gateway wired to it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use gaming_gateway::config::{GatewayConfig, StoreBackend};
use gaming_gateway::http::AppState;
use gaming_gateway::platform::PlatformClient;
use gaming_gateway::store::MemoryBalanceStore;
use gaming_gateway::{HttpServer, Shutdown};

/// How the mock platform answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformBehavior {
    /// Reply with a result and the request's own id.
    Echo,
    /// Reply with a JSON-RPC error object.
    RpcError,
    /// Reply with a non-JSON 500.
    Garbage,
    /// Reply with a result under a different id.
    WrongId,
}

#[derive(Clone)]
struct MockState {
    behavior: PlatformBehavior,
    received: Arc<Mutex<Vec<Value>>>,
}

pub struct MockPlatform {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockPlatform {
    pub fn url(&self) -> String {
        format!("http://{}/rpc", self.addr)
    }

    /// Every envelope the platform has received so far.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

fn result_for(method: &str, params: &Value) -> Value {
    match method {
        "Player.Set" => json!([format!("platform-{}", params["Id"].as_str().unwrap_or(""))]),
        "BankGroup.Set" => json!([params["Id"].clone()]),
        "Session.Create" => json!([{
            "sessionId": "session-1",
            "sessionUrl": format!("https://play.example.com/{}", params["GameId"].as_str().unwrap_or("")),
        }]),
        _ => Value::Null,
    }
}

async fn rpc(State(state): State<MockState>, Json(request): Json<Value>) -> impl IntoResponse {
    state.received.lock().unwrap().push(request.clone());

    let id = request["id"].as_u64().unwrap_or(0);
    let method = request["method"].as_str().unwrap_or("");

    match state.behavior {
        PlatformBehavior::Echo => (
            StatusCode::OK,
            Json(json!({"jsonrpc": "2.0", "id": id, "result": result_for(method, &request["params"])})),
        )
            .into_response(),
        PlatformBehavior::RpcError => (
            StatusCode::OK,
            Json(json!({"jsonrpc": "2.0", "id": id, "error": {"code": -32000, "message": "player blocked"}})),
        )
            .into_response(),
        PlatformBehavior::Garbage => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        PlatformBehavior::WrongId => (
            StatusCode::OK,
            Json(json!({"jsonrpc": "2.0", "id": id + 1000, "result": result_for(method, &request["params"])})),
        )
            .into_response(),
    }
}

/// Start a mock platform on an ephemeral loopback port.
pub async fn start_mock_platform(behavior: PlatformBehavior) -> MockPlatform {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/rpc", post(rpc)).with_state(MockState {
        behavior,
        received: received.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockPlatform { addr, received }
}

pub struct TestGateway {
    pub addr: SocketAddr,
    pub store: MemoryBalanceStore,
    pub client: reqwest::Client,
    shutdown: Arc<Shutdown>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway backed by an in-memory store and talking to `platform_url`.
pub async fn start_gateway(platform_url: String) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.database.backend = StoreBackend::Memory;
    config.handler.api_version = "1.2.3".to_string();
    config.handler.default_balance = 100.0;
    config.platform.url = platform_url.clone();

    let store = MemoryBalanceStore::new();
    let platform = PlatformClient::with_first_id(reqwest::Client::new(), platform_url, 1000);
    let state = AppState::new(&config, Arc::new(platform), Arc::new(store.clone()));

    let server = HttpServer::new(&config, state);
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    TestGateway {
        addr,
        store,
        client,
        shutdown,
    }
}
