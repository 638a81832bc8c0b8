//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the boundary between the pure engine and the outside world.
//! Adapters implement them to supply prices, vault state and yield metrics,
//! and to turn computed values into transactions.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │        Services         │
//!                    │                         │
//!     ┌──────────────┤   Domain + Port         ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Oracle  │            │ Vault/Yield │              │ Submitter │
//! │ Adapter │            │   Readers   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`PriceOracle`], [`AccountFetcher`] - Oracle readings and raw account data
//! - [`VaultStateReader`] - Vault aggregate and position state
//! - [`YieldSource`] - Per-venue yield metrics
//! - [`TransactionSubmitter`] - Side effects (swaps, deposits, rebalances)
//! - [`Clock`] - Current time for freshness checks

mod clock;
mod execution;
mod oracle;
mod vault;
mod yield_source;

pub use clock::{Clock, SystemClock};
pub use execution::{TransactionSignature, TransactionSubmitter};
pub use oracle::{AccountFetcher, PriceOracle};
pub use vault::VaultStateReader;
pub use yield_source::YieldSource;
