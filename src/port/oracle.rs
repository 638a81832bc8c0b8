//! Price-feed ports.

use async_trait::async_trait;

use crate::domain::{Address, OracleFeed, OraclePrice};
use crate::error::Result;

/// A source of oracle readings.
///
/// Implementations return the latest raw reading for `feed`; validation is the
/// caller's job.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Fetch the current reading for a feed.
    async fn price(&self, feed: &OracleFeed) -> Result<OraclePrice>;
}

/// Raw account data access, used by decoders such as the Pyth adapter.
#[async_trait]
pub trait AccountFetcher: Send + Sync {
    /// Fetch an account's data, or `None` when the account does not exist.
    async fn fetch(&self, address: &Address) -> Result<Option<Vec<u8>>>;
}
