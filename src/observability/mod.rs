//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, platform client, balance store produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every log line of a request via TraceLayer spans
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
