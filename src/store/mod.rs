//! Balance store subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → BalanceStore trait (types.rs)
//!     → postgres.rs (pooled connection, one parameterized statement)
//!       or memory.rs (DashMap, same semantics)
//! ```
//!
//! # Invariants
//! - Player identity is unique; duplicates surface as `Conflict`
//! - Reads and updates address exactly one row; zero rows is `NotFound`
//! - No multi-statement transactions; every statement auto-commits

pub mod memory;
pub mod postgres;
pub mod queries;
pub mod types;

pub use memory::MemoryBalanceStore;
pub use postgres::PgBalanceStore;
pub use types::{BalanceStore, NewPlayer, Player, StoreError, StoreResult};
