//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, body limit, request ID, metrics)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::request_id;
use crate::observability::metrics;
use crate::platform::PlatformApi;
use crate::store::BalanceStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<dyn PlatformApi>,
    pub store: Arc<dyn BalanceStore>,
    pub api_version: Arc<str>,
    pub default_balance: f64,
    pub default_currency: Arc<str>,
}

impl AppState {
    pub fn new(
        config: &GatewayConfig,
        platform: Arc<dyn PlatformApi>,
        store: Arc<dyn BalanceStore>,
    ) -> Self {
        Self {
            platform,
            store,
            api_version: config.handler.api_version.as_str().into(),
            default_balance: config.handler.default_balance,
            default_currency: config.platform.default_currency.as_str().into(),
        }
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and dependencies.
    pub fn new(config: &GatewayConfig, state: AppState) -> Self {
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/get_player_balance/{id}", get(handlers::get_player_balance))
            .route("/update_player_balance/{id}", post(handlers::update_player_balance))
            .route("/create_player", post(handlers::create_player))
            .route("/create_bank_group", post(handlers::create_bank_group))
            .route("/create_session", post(handlers::create_session))
            .route_layer(middleware::from_fn(track_requests))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.handler.max_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                        let request_id = request_id(request.headers()).unwrap_or("unknown");
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until shutdown fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(route, response.status().as_u16());
    response
}
