//! Oracle price readings and the validation gate applied to them.
//!
//! A reading is accepted only when it is fresh enough, optionally in trading
//! status, non-zero, and has a confidence interval narrow enough relative to
//! the price. Validation is re-run on every fetch; readings are never cached.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::Address;
use super::math::{mul_div, Rounding};
use super::money::{BasisPoints, ScaledAmount, BPS_DENOMINATOR};
use crate::error::{Error, Result};

/// Oracle network a feed belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    Pyth,
    Switchboard,
}

impl OracleKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pyth => "pyth",
            Self::Switchboard => "switchboard",
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publisher status attached to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceStatus {
    #[default]
    Unknown,
    Trading,
    Halted,
    Auction,
    Ignored,
}

/// Identity of a price feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OracleFeed {
    pub kind: OracleKind,
    pub address: Address,
}

impl OracleFeed {
    pub fn new(kind: OracleKind, address: impl Into<Address>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }
}

/// A single oracle reading.
///
/// The true price is `price * 10^exponent`; `confidence` uses the same exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OraclePrice {
    pub kind: OracleKind,
    pub feed: Address,
    pub price: i64,
    pub confidence: u64,
    pub exponent: i32,
    /// Unix seconds.
    pub publish_time: i64,
    pub publish_slot: u64,
    pub status: PriceStatus,
}

/// Acceptance policy for oracle readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OraclePolicy {
    pub max_age_secs: i64,
    pub max_confidence_bps: BasisPoints,
    pub require_trading: bool,
}

impl OraclePrice {
    /// `confidence / |price|` in bps, rounded up.
    ///
    /// # Errors
    ///
    /// Returns `OracleConfidenceTooWide` when the price is zero.
    pub fn confidence_bps(&self) -> Result<ScaledAmount> {
        let abs_price = self.price.unsigned_abs();
        if abs_price == 0 {
            return Err(Error::confidence(format!(
                "oracle price for feed {} is zero",
                self.feed
            )));
        }
        mul_div(
            ScaledAmount::from(self.confidence),
            ScaledAmount::from(BPS_DENOMINATOR),
            ScaledAmount::from(abs_price),
            Rounding::Up,
        )
    }
}

/// Check a reading against `policy` at time `now` (unix seconds).
///
/// A `publish_time` in the future yields a negative age and is accepted.
///
/// # Errors
///
/// - `OraclePriceStale` when `now - publish_time > max_age_secs`.
/// - `OracleConfidenceTooWide` when trading status is required and missing,
///   when the price is zero, or when the confidence ratio exceeds the limit.
pub fn validate(price: &OraclePrice, now: i64, policy: &OraclePolicy) -> Result<()> {
    let age_secs = now.saturating_sub(price.publish_time);
    if age_secs > policy.max_age_secs {
        return Err(Error::OraclePriceStale {
            feed: price.feed.to_string(),
            age_secs,
            max_age_secs: policy.max_age_secs,
        });
    }

    if policy.require_trading && price.status != PriceStatus::Trading {
        return Err(Error::confidence(format!(
            "oracle price is not in trading status: {:?}",
            price.status
        )));
    }

    let confidence_bps = price.confidence_bps()?;
    if confidence_bps > ScaledAmount::from(policy.max_confidence_bps) {
        return Err(Error::confidence(format!(
            "confidence interval {confidence_bps} bps exceeds {} bps",
            policy.max_confidence_bps
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn reading(price: i64, confidence: u64, publish_time: i64) -> OraclePrice {
        OraclePrice {
            kind: OracleKind::Pyth,
            feed: Address::from("feed"),
            price,
            confidence,
            exponent: -8,
            publish_time,
            publish_slot: 1,
            status: PriceStatus::Trading,
        }
    }

    fn policy(max_age_secs: i64, max_confidence_bps: BasisPoints) -> OraclePolicy {
        OraclePolicy {
            max_age_secs,
            max_confidence_bps,
            require_trading: false,
        }
    }

    #[test]
    fn accepts_at_the_age_boundary() {
        let price = reading(100_000, 10, 1_000);
        assert!(validate(&price, 1_060, &policy(60, 100)).is_ok());

        let err = validate(&price, 1_061, &policy(60, 100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OraclePriceStale);
    }

    #[test]
    fn future_publish_time_is_accepted() {
        let price = reading(100_000, 10, 2_000);
        assert!(validate(&price, 1_000, &policy(0, 100)).is_ok());
    }

    #[test]
    fn requires_trading_status_when_asked() {
        let mut price = reading(100_000, 10, 1_000);
        price.status = PriceStatus::Halted;
        let strict = OraclePolicy {
            require_trading: true,
            ..policy(60, 100)
        };

        let err = validate(&price, 1_000, &strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OracleConfidenceTooWide);
        assert!(validate(&price, 1_000, &policy(60, 100)).is_ok());
    }

    #[test]
    fn rejects_zero_price() {
        let price = reading(0, 0, 1_000);
        let err = validate(&price, 1_000, &policy(60, 10_000)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OracleConfidenceTooWide);
    }

    #[test]
    fn confidence_ratio_rounds_up() {
        // 1 / 30_000 * 10_000 = 0.33 bps, rounds up to 1
        let price = reading(30_000, 1, 1_000);
        assert_eq!(price.confidence_bps().unwrap(), ScaledAmount::from(1u64));
        assert!(validate(&price, 1_000, &policy(60, 1)).is_ok());
        assert!(validate(&price, 1_000, &policy(60, 0)).is_err());
    }

    #[test]
    fn negative_price_uses_absolute_value() {
        let price = reading(-10_000, 100, 1_000);
        assert_eq!(price.confidence_bps().unwrap(), ScaledAmount::from(100u64));
        assert!(validate(&price, 1_000, &policy(60, 100)).is_ok());
        assert!(validate(&price, 1_000, &policy(60, 99)).is_err());
    }
}
