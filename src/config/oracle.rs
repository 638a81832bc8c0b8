//! `[oracle]` section.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{AssetId, BasisPoints, OracleFeed, OracleKind};
use crate::service::OracleConfig;

/// A USD feed declared under `[oracle.feeds.<ASSET>]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedEntry {
    pub kind: OracleKind,
    pub address: String,
}

/// Oracle acceptance policy and per-asset USD feeds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OracleSection {
    /// Oldest acceptable reading, in seconds.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: i64,
    /// Widest acceptable `confidence / |price|`, in bps.
    #[serde(default = "default_max_confidence_bps")]
    pub max_confidence_bps: BasisPoints,
    #[serde(default)]
    pub require_trading_status: bool,
    #[serde(default)]
    pub feeds: BTreeMap<String, FeedEntry>,
}

const fn default_max_age_secs() -> i64 {
    60
}

const fn default_max_confidence_bps() -> BasisPoints {
    100
}

impl Default for OracleSection {
    fn default() -> Self {
        Self {
            max_age_secs: default_max_age_secs(),
            max_confidence_bps: default_max_confidence_bps(),
            require_trading_status: false,
            feeds: BTreeMap::new(),
        }
    }
}

impl From<&OracleSection> for OracleConfig {
    fn from(section: &OracleSection) -> Self {
        Self {
            usd_feeds: section
                .feeds
                .iter()
                .map(|(asset, feed)| {
                    (
                        AssetId::new(asset.clone()),
                        OracleFeed::new(feed.kind, feed.address.clone()),
                    )
                })
                .collect(),
            max_age_secs: section.max_age_secs,
            max_confidence_bps: section.max_confidence_bps,
            require_trading_status: section.require_trading_status,
        }
    }
}
