//! Platform integration subsystem.
//!
//! # Data Flow
//! ```text
//! handler input (player / bank group / session identifiers)
//!     → types.rs (typed params, JSON-RPC envelope)
//!     → client.rs (POST over net::transport, decode, correlate)
//!     → PlatformReply returned to the handler
//! ```
//!
//! # Constraints
//! - One round trip per call: no retries, batching or caching
//! - Fresh correlation id per call; the reply must echo it
//! - The only deadline is the transport timeout

pub mod client;
pub mod types;

pub use client::{PlatformApi, PlatformClient};
pub use types::{
    BankGroupCreationResult, BankGroupParams, Method, PlatformError, PlatformReply, PlatformResult,
    PlayerCreationResult, PlayerParams, SessionCreationResult, SessionParams, SessionResult,
};
