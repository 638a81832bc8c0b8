//! Cross-rate derivation from two USD-denominated readings.

use super::math::{mul_div, pow10, Rounding};
use super::money::ScaledAmount;
use super::oracle::OraclePrice;
use crate::error::{Error, Result};

/// Fixed decimal scale applied to the price ratio.
pub const CROSS_RATE_DECIMALS: u32 = 18;

/// Exchange rate between two assets.
///
/// The true ratio is `scaled_ratio * 10^exponent` units of the destination
/// asset per unit of the source asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRate {
    pub scaled_ratio: ScaledAmount,
    pub exponent: i32,
    /// The destination asset's USD reading; attributed on resulting quotes.
    pub source_price: OraclePrice,
}

/// Derive the `to / from` rate from two USD readings.
///
/// # Errors
///
/// Returns `OracleConfidenceTooWide` when the source price is not positive or
/// the destination price is negative.
pub fn cross_rate(from_usd: &OraclePrice, to_usd: &OraclePrice) -> Result<CrossRate> {
    if from_usd.price <= 0 {
        return Err(Error::confidence(format!(
            "source USD price for feed {} must be positive, got {}",
            from_usd.feed, from_usd.price
        )));
    }
    if to_usd.price < 0 {
        return Err(Error::confidence(format!(
            "destination USD price for feed {} is negative: {}",
            to_usd.feed, to_usd.price
        )));
    }

    let exponent = to_usd
        .exponent
        .checked_sub(from_usd.exponent)
        .and_then(|e| e.checked_sub(CROSS_RATE_DECIMALS as i32))
        .ok_or_else(|| Error::invalid_argument("cross-rate exponent out of range"))?;

    let scaled_ratio = mul_div(
        ScaledAmount::from(to_usd.price.unsigned_abs()),
        pow10(CROSS_RATE_DECIMALS)?,
        ScaledAmount::from(from_usd.price.unsigned_abs()),
        Rounding::Down,
    )?;

    Ok(CrossRate {
        scaled_ratio,
        exponent,
        source_price: to_usd.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::Address;
    use crate::domain::oracle::{OracleKind, PriceStatus};
    use crate::error::ErrorKind;

    fn usd(feed: &str, price: i64, exponent: i32) -> OraclePrice {
        OraclePrice {
            kind: OracleKind::Pyth,
            feed: Address::from(feed),
            price,
            confidence: 0,
            exponent,
            publish_time: 0,
            publish_slot: 0,
            status: PriceStatus::Trading,
        }
    }

    #[test]
    fn ratio_of_equal_exponents() {
        // to / from with SOL at $150 and USDC at $1, both expo -8
        let usdc = usd("usdc", 100_000_000, -8);
        let sol = usd("sol", 15_000_000_000, -8);

        let rate = cross_rate(&usdc, &sol).unwrap();
        assert_eq!(rate.exponent, -18);
        assert_eq!(
            rate.scaled_ratio,
            ScaledAmount::from(150u64) * pow10(18).unwrap()
        );
        assert_eq!(rate.source_price.feed, Address::from("sol"));
    }

    #[test]
    fn exponent_difference_is_carried() {
        let from = usd("a", 2, -2);
        let to = usd("b", 3, -5);

        let rate = cross_rate(&from, &to).unwrap();
        assert_eq!(rate.exponent, -5 + 2 - 18);
        // 3 * 1e18 / 2
        assert_eq!(rate.scaled_ratio, ScaledAmount::from(1_500_000_000_000_000_000u64));
    }

    #[test]
    fn ratio_rounds_down() {
        let rate = cross_rate(&usd("a", 3, 0), &usd("b", 1, 0)).unwrap();
        assert_eq!(rate.scaled_ratio, ScaledAmount::from(333_333_333_333_333_333u64));
    }

    #[test]
    fn zero_source_price_is_rejected() {
        let err = cross_rate(&usd("a", 0, -8), &usd("b", 1, -8)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OracleConfidenceTooWide);
    }

    #[test]
    fn negative_prices_are_rejected() {
        assert!(cross_rate(&usd("a", -1, -8), &usd("b", 1, -8)).is_err());
        assert!(cross_rate(&usd("a", 1, -8), &usd("b", -1, -8)).is_err());
    }
}
