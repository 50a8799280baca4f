//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! platform.tls paths (CA bundle, client cert/key)
//!     → tls.rs (read + PEM parse, fail fast on bad material)
//!     → transport.rs (reqwest client with rustls, timeout)
//!     → shared by the platform client for every outbound call
//! ```
//!
//! # Design Decisions
//! - TLS material problems surface at startup, never on the first request
//! - One client per process

pub mod tls;
pub mod transport;

pub use tls::TlsMaterial;
pub use transport::{SecureTransport, TransportConfigError};
