//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{
    Address, AssetId, OracleKind, OraclePrice, PriceStatus, ScaledAmount, SourceId,
    VaultAggregateState, VaultId, VaultSnapshot, YieldSourceMetrics,
};

/// Shorthand for `ScaledAmount::from(value)`.
pub fn amount(value: u64) -> ScaledAmount {
    ScaledAmount::from(value)
}

/// A trading Pyth reading with exponent 0 and zero confidence.
pub fn usd_price(feed: &str, price: i64, publish_time: i64) -> OraclePrice {
    OraclePrice {
        kind: OracleKind::Pyth,
        feed: Address::from(feed),
        price,
        confidence: 0,
        exponent: 0,
        publish_time,
        publish_slot: 0,
        status: PriceStatus::Trading,
    }
}

/// A reading with explicit exponent and confidence.
pub fn scaled_price(
    feed: &str,
    price: i64,
    exponent: i32,
    confidence: u64,
    publish_time: i64,
) -> OraclePrice {
    OraclePrice {
        exponent,
        confidence,
        ..usd_price(feed, price, publish_time)
    }
}

/// A vault holding `total_assets` against `total_shares`.
pub fn vault_state(total_assets: u64, total_shares: u64) -> VaultAggregateState {
    VaultAggregateState::new(amount(total_assets), amount(total_shares))
}

/// A snapshot of vault `id` for `asset`.
pub fn vault_snapshot(id: &str, asset: &str, state: VaultAggregateState) -> VaultSnapshot {
    VaultSnapshot {
        vault_id: VaultId::from(id),
        asset: AssetId::from(asset),
        state,
        last_updated: None,
    }
}

/// Metrics for source `id`.
pub fn metrics(
    id: &str,
    apr_bps: i64,
    liquidity_usd: Decimal,
    risk_score: Decimal,
) -> YieldSourceMetrics {
    YieldSourceMetrics {
        source_id: SourceId::from(id),
        apr_bps,
        liquidity_usd,
        risk_score,
        updated_at: 0,
    }
}
