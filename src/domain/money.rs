//! Monetary types for token amounts and basis-point fractions.

use alloy_primitives::U256;

use crate::error::{Error, Result};

/// Token amount in its smallest unit.
///
/// Amounts are never negative and never built from floating point; use
/// [`to_scaled_amount`] for text input or `ScaledAmount::from(u64)`.
pub type ScaledAmount = U256;

/// A fraction of [`BPS_DENOMINATOR`]; valid values lie in `[0, 10000]`.
pub type BasisPoints = u32;

/// 10 000 bps = 100 %.
pub const BPS_DENOMINATOR: BasisPoints = 10_000;

/// Parse a canonical unsigned base-10 amount.
///
/// Only ASCII digits are accepted. Leading zeros are fine; signs, decimal
/// points, exponents, whitespace and empty input are rejected, as is any value
/// above `2^256 - 1`.
///
/// # Examples
///
/// ```
/// use laserium::domain::money::{to_scaled_amount, ScaledAmount};
///
/// assert_eq!(to_scaled_amount("007").unwrap(), ScaledAmount::from(7u64));
/// assert!(to_scaled_amount("1.5").is_err());
/// assert!(to_scaled_amount("-1").is_err());
/// ```
pub fn to_scaled_amount(value: &str) -> Result<ScaledAmount> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_argument(format!(
            "amount must be a base-10 integer, got {value:?}"
        )));
    }
    U256::from_str_radix(value, 10)
        .map_err(|_| Error::invalid_argument(format!("amount {value} does not fit in 256 bits")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_digits() {
        assert_eq!(
            to_scaled_amount("1000000").unwrap(),
            ScaledAmount::from(1_000_000u64)
        );
        assert_eq!(to_scaled_amount("0").unwrap(), ScaledAmount::ZERO);
        assert_eq!(to_scaled_amount("0042").unwrap(), ScaledAmount::from(42u64));
    }

    #[test]
    fn rejects_non_canonical_input() {
        for bad in ["", " 1", "1 ", "+1", "-1", "1.0", "1e6", "0x10", "1_000", "abc"] {
            let err = to_scaled_amount(bad).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument, "{bad:?}");
        }
    }

    #[test]
    fn rejects_values_above_256_bits() {
        let max = ScaledAmount::MAX.to_string();
        assert_eq!(to_scaled_amount(&max).unwrap(), ScaledAmount::MAX);

        // 2^256 is one more than the maximum
        let overflow = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(to_scaled_amount(overflow).is_err());
    }

    #[test]
    fn display_round_trips() {
        for value in [0u64, 1, 9, 10, 12_345_678_901, u64::MAX] {
            let amount = ScaledAmount::from(value);
            assert_eq!(to_scaled_amount(&amount.to_string()).unwrap(), amount);
        }
        let big = ScaledAmount::MAX - ScaledAmount::from(12_345u64);
        assert_eq!(to_scaled_amount(&big.to_string()).unwrap(), big);
    }
}
