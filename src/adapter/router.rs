//! Dispatches feed reads to the oracle registered for the feed's kind.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{OracleFeed, OracleKind, OraclePrice};
use crate::error::{Error, Result};
use crate::port::PriceOracle;

/// A [`PriceOracle`] that routes on [`OracleFeed::kind`].
#[derive(Default)]
pub struct OracleRouter {
    oracles: HashMap<OracleKind, Arc<dyn PriceOracle>>,
}

impl OracleRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the oracle serving `kind`, replacing any previous one.
    #[must_use]
    pub fn with(mut self, kind: OracleKind, oracle: Arc<dyn PriceOracle>) -> Self {
        self.oracles.insert(kind, oracle);
        self
    }
}

#[async_trait]
impl PriceOracle for OracleRouter {
    async fn price(&self, feed: &OracleFeed) -> Result<OraclePrice> {
        let oracle = self
            .oracles
            .get(&feed.kind)
            .ok_or_else(|| Error::OracleAdapterUnavailable {
                kind: feed.kind.to_string(),
            })?;
        oracle.price(feed).await
    }
}
