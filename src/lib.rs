//! Gaming platform gateway library.
//!
//! Bridges a gaming platform's JSON-RPC API and a local player-balance store,
//! exposed to internal callers over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod platform;
pub mod store;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
