//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, tracing, body limit)
//!     → handlers.rs (parse input, call platform and/or balance store)
//!     → error.rs (map failures to status + {"message"})
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, MessageResponse};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
