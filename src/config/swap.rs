//! `[swap]` section.

use serde::Deserialize;

use crate::domain::BasisPoints;
use crate::service::SwapConfig;

/// Default pricing applied to quotes that do not override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SwapSection {
    #[serde(default = "default_fee_bps")]
    pub fee_bps: BasisPoints,
    #[serde(default = "default_spread_bps")]
    pub spread_bps: BasisPoints,
    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: BasisPoints,
}

const fn default_fee_bps() -> BasisPoints {
    30
}

const fn default_spread_bps() -> BasisPoints {
    10
}

const fn default_slippage_bps() -> BasisPoints {
    50
}

impl Default for SwapSection {
    fn default() -> Self {
        Self {
            fee_bps: default_fee_bps(),
            spread_bps: default_spread_bps(),
            slippage_bps: default_slippage_bps(),
        }
    }
}

impl From<&SwapSection> for SwapConfig {
    fn from(section: &SwapSection) -> Self {
        Self {
            default_fee_bps: section.fee_bps,
            default_spread_bps: section.spread_bps,
            default_slippage_bps: section.slippage_bps,
        }
    }
}
