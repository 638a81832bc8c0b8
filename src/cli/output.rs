//! CLI output formatting.
//!
//! Human-readable output uses labeled, colored fields. With `--json` each
//! command prints a single JSON object instead.

use std::fmt::Display;

use owo_colors::OwoColorize;
use serde_json::{json, Value};

use crate::domain::{SwapQuote, VaultSnapshot, YieldAllocation};

/// Output mode selected by the global flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
}

impl Output {
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print the application header with name and version.
    pub fn header(&self, version: &str) {
        if self.json {
            return;
        }
        println!("{} {}", "laserium".bold(), version.dimmed());
        println!();
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if self.json {
            return;
        }
        println!();
        println!("{}", title.bold());
    }

    /// Print a labeled value.
    pub fn field(&self, label: &str, value: impl Display) {
        if self.json {
            return;
        }
        println!("  {:<16} {}", label.dimmed(), value);
    }

    /// Print a warning line.
    pub fn warning(&self, message: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", "⚠".yellow(), message);
    }

    /// Print `payload` when in JSON mode.
    pub fn emit(&self, payload: &Value) {
        if self.json {
            println!("{payload}");
        }
    }
}

pub fn quote_json(quote: &SwapQuote) -> Value {
    json!({
        "from": quote.from_asset,
        "to": quote.to_asset,
        "in_amount": quote.in_amount.to_string(),
        "out_amount": quote.out_amount.to_string(),
        "min_out_amount": quote.min_out_amount.to_string(),
        "price": quote.price.to_string(),
        "price_exponent": quote.price_exponent,
        "fee_bps": quote.fee_bps,
        "spread_bps": quote.spread_bps,
        "slippage_bps": quote.slippage_bps,
        "oracle": quote.oracle,
    })
}

pub fn vault_json(snapshot: &VaultSnapshot) -> Value {
    let state = &snapshot.state;
    json!({
        "vault": snapshot.vault_id,
        "asset": snapshot.asset,
        "total_assets": state.total_assets.to_string(),
        "total_shares": state.total_shares.to_string(),
        "capacity_assets": state.capacity_assets.map(|c| c.to_string()),
        "utilization_bps": state.utilization_bps,
        "last_updated": snapshot.last_updated,
    })
}

pub fn allocation_json(allocation: &YieldAllocation) -> Value {
    json!({
        "source": allocation.source_id,
        "weight_bps": allocation.weight_bps,
        "apr_bps": allocation.metrics.apr_bps,
        "liquidity_usd": allocation.metrics.liquidity_usd.to_string(),
        "risk_score": allocation.metrics.risk_score.to_string(),
    })
}

/// `weight_bps` as a percentage with two decimals.
#[must_use]
pub fn percent(bps: u32) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bps_as_percent() {
        assert_eq!(percent(10_000), "100.00%");
        assert_eq!(percent(3_333), "33.33%");
        assert_eq!(percent(5), "0.05%");
    }
}
