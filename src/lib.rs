//! Laserium - deterministic pricing and accounting for single-asset vaults.
//!
//! The engine validates oracle readings, derives cross-rates, quotes swaps,
//! converts between vault shares and assets, and splits capital across yield
//! sources. All arithmetic on token amounts is exact integer math on 256-bit
//! values; nothing is rounded through floating point.
//!
//! # Architecture
//!
//! - **[`domain`]** - Pure, synchronous pricing and accounting functions
//! - **[`port`]** - Traits for oracles, vault state, yield sources, submission
//!   and time
//! - **[`adapter`]** - Pyth and Switchboard decoding, oracle routing and the
//!   offline snapshot
//! - **[`service`]** - Async services combining domain logic with ports
//! - **[`config`]** - TOML configuration
//! - **[`cli`]** - The `laserium` preview tool
//!
//! # Features
//!
//! - `testkit` - Export in-memory port implementations and builders for tests
//!
//! # Example
//!
//! ```
//! use laserium::domain::{preview_deposit, ScaledAmount, VaultAggregateState};
//!
//! let state = VaultAggregateState::new(ScaledAmount::from(2_000u64), ScaledAmount::from(1_000u64));
//! let shares = preview_deposit(&state, ScaledAmount::from(500u64)).unwrap();
//! assert_eq!(shares, ScaledAmount::from(250u64));
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, ErrorKind, Result};
