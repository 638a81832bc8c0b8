//! Switchboard adapter.
//!
//! Switchboard ships several account layouts, so decoding is left to an
//! application-supplied [`SwitchboardDecoder`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Address, OracleFeed, OracleKind, OraclePrice, PriceStatus};
use crate::error::{Error, Result};
use crate::port::{AccountFetcher, PriceOracle};

/// Fields extracted from a Switchboard aggregator account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAggregator {
    pub price: i64,
    pub confidence: u64,
    pub exponent: i32,
    pub publish_time: i64,
    pub publish_slot: u64,
    /// Reported as [`PriceStatus::Unknown`] when absent.
    pub status: Option<PriceStatus>,
}

/// Decodes a raw aggregator account for one feed.
pub trait SwitchboardDecoder: Send + Sync {
    fn decode(&self, data: &[u8], feed: &Address) -> Result<DecodedAggregator>;
}

impl<F> SwitchboardDecoder for F
where
    F: Fn(&[u8], &Address) -> Result<DecodedAggregator> + Send + Sync,
{
    fn decode(&self, data: &[u8], feed: &Address) -> Result<DecodedAggregator> {
        self(data, feed)
    }
}

/// [`PriceOracle`] for Switchboard feeds.
pub struct SwitchboardOracle {
    fetcher: Arc<dyn AccountFetcher>,
    decoder: Arc<dyn SwitchboardDecoder>,
}

impl SwitchboardOracle {
    pub fn new(fetcher: Arc<dyn AccountFetcher>, decoder: Arc<dyn SwitchboardDecoder>) -> Self {
        Self { fetcher, decoder }
    }
}

#[async_trait]
impl PriceOracle for SwitchboardOracle {
    async fn price(&self, feed: &OracleFeed) -> Result<OraclePrice> {
        if feed.kind != OracleKind::Switchboard {
            return Err(Error::invalid_argument(format!(
                "switchboard oracle cannot read {} feed {}",
                feed.kind, feed.address
            )));
        }

        let data = self.fetcher.fetch(&feed.address).await?.ok_or_else(|| {
            Error::account_parse(format!("switchboard feed {} not found", feed.address))
        })?;

        let decoded = self.decoder.decode(&data, &feed.address)?;
        debug!(
            feed = %feed.address,
            price = decoded.price,
            exponent = decoded.exponent,
            "Decoded switchboard price"
        );

        Ok(OraclePrice {
            kind: OracleKind::Switchboard,
            feed: feed.address.clone(),
            price: decoded.price,
            confidence: decoded.confidence,
            exponent: decoded.exponent,
            publish_time: decoded.publish_time,
            publish_slot: decoded.publish_slot,
            status: decoded.status.unwrap_or_default(),
        })
    }
}
