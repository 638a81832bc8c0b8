//! Offline ledger snapshot.
//!
//! A snapshot is a TOML file capturing oracle readings, vault accounts,
//! positions and yield-source metrics at a single instant. It backs the
//! preview CLI and integration tests: every read port is answered from the
//! captured data and the clock is pinned at `captured_at`, so results are
//! reproducible.
//!
//! ```toml
//! captured_at = 1700000000
//!
//! [[prices]]
//! asset = "SOL"
//! kind = "pyth"
//! feed = "H6ARHf6YXhGYeQfUzQNGk6rDNnLBQKrenN712K4AQJEG"
//! price = 15000000000
//! confidence = 1500000
//! exponent = -8
//! publish_time = 1699999990
//! status = "trading"
//!
//! [[vaults]]
//! id = "usdc-core"
//! asset = "USDC"
//! total_assets = "1000000000"
//! total_shares = "990000000"
//!
//! [[yield_sources]]
//! id = "lending-a"
//! asset = "USDC"
//! apr_bps = 650
//! liquidity_usd = 2500000
//! risk_score = 1.5
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{
    to_scaled_amount, Address, AssetId, BasisPoints, OracleFeed, OracleKind, OraclePrice,
    PositionState, PriceStatus, ScaledAmount, SourceId, VaultAggregateState, VaultId,
    VaultSnapshot, YieldSourceMetrics,
};
use crate::error::{Error, Result};
use crate::port::{Clock, PriceOracle, VaultStateReader, YieldSource};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    captured_at: i64,
    #[serde(default)]
    prices: Vec<PriceEntry>,
    #[serde(default)]
    vaults: Vec<VaultEntry>,
    #[serde(default)]
    positions: Vec<PositionEntry>,
    #[serde(default)]
    yield_sources: Vec<YieldSourceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PriceEntry {
    asset: Option<String>,
    kind: OracleKind,
    feed: String,
    price: i64,
    #[serde(default)]
    confidence: u64,
    exponent: i32,
    publish_time: i64,
    #[serde(default)]
    publish_slot: u64,
    #[serde(default)]
    status: PriceStatus,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VaultEntry {
    id: String,
    asset: String,
    total_assets: String,
    total_shares: String,
    capacity_assets: Option<String>,
    utilization_bps: Option<BasisPoints>,
    last_updated: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PositionEntry {
    vault: String,
    owner: String,
    shares: String,
    last_updated: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YieldSourceEntry {
    id: String,
    asset: String,
    apr_bps: i64,
    liquidity_usd: Decimal,
    #[serde(default)]
    risk_score: Decimal,
    updated_at: Option<i64>,
}

/// Ledger state captured at one instant.
#[derive(Debug, Clone)]
pub struct Snapshot {
    captured_at: i64,
    prices: HashMap<Address, OraclePrice>,
    usd_feeds: HashMap<AssetId, OracleFeed>,
    vaults: HashMap<VaultId, VaultSnapshot>,
    positions: HashMap<(VaultId, Address), PositionState>,
    yield_sources: Vec<(AssetId, YieldSourceMetrics)>,
}

impl Snapshot {
    /// Load a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns `AccountParseError` if the file cannot be read or is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::account_parse(format!("failed to read snapshot {}: {e}", path.display()))
        })?;
        Self::parse_toml(&content)
    }

    /// Parse snapshot TOML.
    ///
    /// # Errors
    ///
    /// Returns `AccountParseError` for invalid TOML, unknown fields, or
    /// amounts that are not canonical base-10 integers.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(content)
            .map_err(|e| Error::account_parse(format!("invalid snapshot: {e}")))?;
        Self::from_file(file)
    }

    fn from_file(file: SnapshotFile) -> Result<Self> {
        let mut prices = HashMap::with_capacity(file.prices.len());
        let mut usd_feeds = HashMap::new();
        for entry in file.prices {
            let feed = Address::new(entry.feed);
            if let Some(asset) = entry.asset {
                usd_feeds.insert(AssetId::new(asset), OracleFeed::new(entry.kind, feed.clone()));
            }
            prices.insert(
                feed.clone(),
                OraclePrice {
                    kind: entry.kind,
                    feed,
                    price: entry.price,
                    confidence: entry.confidence,
                    exponent: entry.exponent,
                    publish_time: entry.publish_time,
                    publish_slot: entry.publish_slot,
                    status: entry.status,
                },
            );
        }

        let mut vaults = HashMap::with_capacity(file.vaults.len());
        for entry in file.vaults {
            let vault_id = VaultId::new(entry.id);
            let mut state = VaultAggregateState::new(
                amount(&vault_id, "total_assets", &entry.total_assets)?,
                amount(&vault_id, "total_shares", &entry.total_shares)?,
            );
            if let Some(capacity) = entry.capacity_assets {
                state = state.with_capacity(amount(&vault_id, "capacity_assets", &capacity)?);
            }
            if let Some(utilization) = entry.utilization_bps {
                state = state.with_utilization(utilization);
            }
            vaults.insert(
                vault_id.clone(),
                VaultSnapshot {
                    vault_id,
                    asset: AssetId::new(entry.asset),
                    state,
                    last_updated: entry.last_updated,
                },
            );
        }

        let mut positions = HashMap::with_capacity(file.positions.len());
        for entry in file.positions {
            let vault_id = VaultId::new(entry.vault);
            let owner = Address::new(entry.owner);
            let shares = amount(&vault_id, "shares", &entry.shares)?;
            positions.insert(
                (vault_id.clone(), owner.clone()),
                PositionState {
                    vault_id,
                    owner,
                    shares,
                    last_updated: entry.last_updated,
                },
            );
        }

        let yield_sources: Vec<(AssetId, YieldSourceMetrics)> = file
            .yield_sources
            .into_iter()
            .map(|entry| {
                if entry.liquidity_usd < Decimal::ZERO {
                    return Err(Error::account_parse(format!(
                        "yield source {} has negative liquidity_usd {}",
                        entry.id, entry.liquidity_usd
                    )));
                }
                let metrics = YieldSourceMetrics {
                    source_id: SourceId::new(entry.id),
                    apr_bps: entry.apr_bps,
                    liquidity_usd: entry.liquidity_usd,
                    risk_score: entry.risk_score,
                    updated_at: entry.updated_at.unwrap_or(file.captured_at),
                };
                Ok((AssetId::new(entry.asset), metrics))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            captured_at: file.captured_at,
            prices,
            usd_feeds,
            vaults,
            positions,
            yield_sources,
        })
    }

    #[must_use]
    pub const fn captured_at(&self) -> i64 {
        self.captured_at
    }

    /// USD feeds declared by price entries that name their asset.
    #[must_use]
    pub fn usd_feeds(&self) -> &HashMap<AssetId, OracleFeed> {
        &self.usd_feeds
    }

    /// One [`YieldSource`] per captured source with metrics for `asset`, in
    /// file order.
    #[must_use]
    pub fn yield_sources_for(self: &Arc<Self>, asset: &AssetId) -> Vec<Arc<dyn YieldSource>> {
        let mut seen = Vec::new();
        for (source_asset, metrics) in &self.yield_sources {
            if source_asset == asset && !seen.contains(&metrics.source_id) {
                seen.push(metrics.source_id.clone());
            }
        }
        seen.into_iter()
            .map(|id| {
                Arc::new(SnapshotYieldSource {
                    id,
                    snapshot: Arc::clone(self),
                }) as Arc<dyn YieldSource>
            })
            .collect()
    }
}

fn amount(vault_id: &VaultId, field: &str, value: &str) -> Result<ScaledAmount> {
    to_scaled_amount(value)
        .map_err(|e| Error::account_parse(format!("vault {vault_id} field {field}: {e}")))
}

impl Clock for Snapshot {
    fn now_unix_secs(&self) -> i64 {
        self.captured_at
    }
}

#[async_trait]
impl PriceOracle for Snapshot {
    async fn price(&self, feed: &OracleFeed) -> Result<OraclePrice> {
        let price = self.prices.get(&feed.address).ok_or_else(|| {
            Error::account_parse(format!("no captured price for feed {}", feed.address))
        })?;
        if price.kind != feed.kind {
            return Err(Error::invalid_argument(format!(
                "feed {} is {} in snapshot, requested as {}",
                feed.address, price.kind, feed.kind
            )));
        }
        Ok(price.clone())
    }
}

#[async_trait]
impl VaultStateReader for Snapshot {
    async fn vault(&self, vault_id: &VaultId) -> Result<VaultSnapshot> {
        self.vaults
            .get(vault_id)
            .cloned()
            .ok_or_else(|| Error::account_parse(format!("vault account {vault_id} not found")))
    }

    async fn position(&self, vault_id: &VaultId, owner: &Address) -> Result<Option<PositionState>> {
        Ok(self
            .positions
            .get(&(vault_id.clone(), owner.clone()))
            .cloned())
    }
}

/// A single captured yield source.
pub struct SnapshotYieldSource {
    id: SourceId,
    snapshot: Arc<Snapshot>,
}

#[async_trait]
impl YieldSource for SnapshotYieldSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn metrics(&self, asset: &AssetId) -> Result<YieldSourceMetrics> {
        self.snapshot
            .yield_sources
            .iter()
            .find(|(source_asset, m)| source_asset == asset && m.source_id == self.id)
            .map(|(_, m)| m.clone())
            .ok_or_else(|| {
                Error::account_parse(format!("source {} has no metrics for {asset}", self.id))
            })
    }
}
