//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for amounts, oracle readings, vault state and
//!   yield metrics.
//! - [`oracle`] - In-memory [`PriceOracle`](crate::port::PriceOracle),
//!   [`AccountFetcher`](crate::port::AccountFetcher) and
//!   [`Clock`](crate::port::Clock) implementations.
//! - [`vault`] - Mutable in-memory [`VaultStateReader`](crate::port::VaultStateReader).
//! - [`yield_source`] - Static and failing yield sources.
//! - [`submitter`] - A [`TransactionSubmitter`](crate::port::TransactionSubmitter)
//!   that records what it was asked to submit.

pub mod domain;
pub mod oracle;
pub mod submitter;
pub mod vault;
pub mod yield_source;
