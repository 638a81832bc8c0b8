//! `[yield_router]` section.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::BasisPoints;
use crate::service::YieldRouterConfig;

/// Scoring parameters for yield routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct YieldRouterSection {
    /// Bps subtracted from a source's APR per point of risk score.
    #[serde(default)]
    pub risk_penalty_bps_per_point: Decimal,
    /// Sources with less USD liquidity are skipped.
    #[serde(default)]
    pub min_liquidity_usd: Decimal,
    /// Upper bound on any one source's share, in bps.
    #[serde(default)]
    pub max_single_source_bps: Option<BasisPoints>,
}

impl From<&YieldRouterSection> for YieldRouterConfig {
    fn from(section: &YieldRouterSection) -> Self {
        Self {
            risk_penalty_bps_per_point: section.risk_penalty_bps_per_point,
            min_liquidity_usd: section.min_liquidity_usd,
            max_single_source_bps: section.max_single_source_bps,
        }
    }
}
