//! Validated USD prices and cross-rates.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::try_join;
use tracing::debug;

use crate::domain::oracle::validate;
use crate::domain::{
    cross_rate, AssetId, BasisPoints, CrossRate, OracleFeed, OraclePolicy, OraclePrice,
};
use crate::error::{Error, Result};
use crate::port::{Clock, PriceOracle};

/// Oracle acceptance settings and the USD feed for each asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    pub usd_feeds: HashMap<AssetId, OracleFeed>,
    pub max_age_secs: i64,
    pub max_confidence_bps: BasisPoints,
    pub require_trading_status: bool,
}

impl OracleConfig {
    #[must_use]
    pub fn with_feed(mut self, asset: impl Into<AssetId>, feed: OracleFeed) -> Self {
        self.usd_feeds.insert(asset.into(), feed);
        self
    }

    #[must_use]
    pub const fn policy(&self) -> OraclePolicy {
        OraclePolicy {
            max_age_secs: self.max_age_secs,
            max_confidence_bps: self.max_confidence_bps,
            require_trading: self.require_trading_status,
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            usd_feeds: HashMap::new(),
            max_age_secs: 60,
            max_confidence_bps: 100,
            require_trading_status: false,
        }
    }
}

/// Fetches USD readings and validates them on every call.
pub struct OracleAdapter {
    oracle: Arc<dyn PriceOracle>,
    clock: Arc<dyn Clock>,
    config: OracleConfig,
}

impl OracleAdapter {
    pub fn new(oracle: Arc<dyn PriceOracle>, clock: Arc<dyn Clock>, config: OracleConfig) -> Self {
        Self {
            oracle,
            clock,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// The validated USD price of `asset`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if no USD feed is configured for the asset.
    /// - Any oracle or validation failure.
    pub async fn usd_price(&self, asset: &AssetId) -> Result<OraclePrice> {
        let feed = self
            .config
            .usd_feeds
            .get(asset)
            .ok_or_else(|| Error::invalid_argument(format!("missing USD oracle feed for {asset}")))?;

        let price = self.oracle.price(feed).await?;
        validate(&price, self.clock.now_unix_secs(), &self.config.policy())?;

        debug!(
            asset = %asset,
            feed = %feed.address,
            price = price.price,
            exponent = price.exponent,
            publish_time = price.publish_time,
            "Validated USD price"
        );
        Ok(price)
    }

    /// The `to / from` rate between two assets.
    ///
    /// Both readings are fetched concurrently and are not guaranteed to come
    /// from the same slot.
    pub async fn cross_rate(&self, from: &AssetId, to: &AssetId) -> Result<CrossRate> {
        let (from_usd, to_usd) = try_join(self.usd_price(from), self.usd_price(to)).await?;
        cross_rate(&from_usd, &to_usd)
    }
}
