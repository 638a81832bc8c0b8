//! Fixed-point arithmetic over scaled integers.
//!
//! Every ratio, fee and conversion in the crate routes through [`mul_div`] so
//! there is exactly one rounding policy to audit:
//!
//! - fee, spread and slippage deductions round [`Rounding::Down`];
//! - confidence-ratio checks round [`Rounding::Up`].
//!
//! # Examples
//!
//! ```
//! use laserium::domain::math::{apply_bps, bps_of, mul_div, Rounding};
//! use laserium::domain::money::ScaledAmount;
//!
//! let a = ScaledAmount::from(10u64);
//! let b = ScaledAmount::from(3u64);
//! let d = ScaledAmount::from(4u64);
//! assert_eq!(mul_div(a, b, d, Rounding::Down).unwrap(), ScaledAmount::from(7u64));
//! assert_eq!(mul_div(a, b, d, Rounding::Up).unwrap(), ScaledAmount::from(8u64));
//!
//! let amount = ScaledAmount::from(10_000u64);
//! assert_eq!(apply_bps(amount, 30, Rounding::Down).unwrap(), ScaledAmount::from(9_970u64));
//! assert_eq!(bps_of(amount, 30, Rounding::Down).unwrap(), ScaledAmount::from(30u64));
//! ```

use alloy_primitives::U512;

use super::money::{BasisPoints, ScaledAmount, BPS_DENOMINATOR};
use crate::error::{Error, Result};

/// Rounding direction for integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Truncate toward zero.
    #[default]
    Down,
    /// Add one when the division leaves a remainder.
    Up,
}

/// Compute `a * b / denom` with the given rounding.
///
/// The product is formed at 512 bits, so it never overflows; only a quotient
/// that does not fit back into a [`ScaledAmount`] is rejected.
///
/// # Errors
///
/// Returns `InvalidArgument` when `denom` is zero or the result overflows.
pub fn mul_div(
    a: ScaledAmount,
    b: ScaledAmount,
    denom: ScaledAmount,
    rounding: Rounding,
) -> Result<ScaledAmount> {
    if denom.is_zero() {
        return Err(Error::invalid_argument("division by zero"));
    }

    let product: U512 = a.widening_mul(b);
    let wide_denom = U512::from_limbs_slice(denom.as_limbs());
    let mut quotient = product / wide_denom;
    if rounding == Rounding::Up && !(product % wide_denom).is_zero() {
        quotient += U512::from(1u64);
    }

    narrow(quotient)
}

fn narrow(value: U512) -> Result<ScaledAmount> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return Err(Error::invalid_argument("mul_div result exceeds 256 bits"));
    }
    Ok(ScaledAmount::from_limbs_slice(&limbs[..4]))
}

/// Validate a basis-point value, returning it narrowed to [`BasisPoints`].
///
/// # Errors
///
/// Returns `InvalidArgument` unless `0 <= bps <= 10000`.
pub fn clamp_bps(bps: i64) -> Result<BasisPoints> {
    if !(0..=i64::from(BPS_DENOMINATOR)).contains(&bps) {
        return Err(Error::invalid_argument(format!(
            "bps must be in [0, 10000], got {bps}"
        )));
    }
    Ok(bps as BasisPoints)
}

/// The amount retained after shaving `bps` off: `amount * (10000 - bps) / 10000`.
pub fn apply_bps(
    amount: ScaledAmount,
    bps: BasisPoints,
    rounding: Rounding,
) -> Result<ScaledAmount> {
    let bps = clamp_bps(i64::from(bps))?;
    mul_div(
        amount,
        ScaledAmount::from(BPS_DENOMINATOR - bps),
        ScaledAmount::from(BPS_DENOMINATOR),
        rounding,
    )
}

/// The fraction itself: `amount * bps / 10000`.
pub fn bps_of(amount: ScaledAmount, bps: BasisPoints, rounding: Rounding) -> Result<ScaledAmount> {
    let bps = clamp_bps(i64::from(bps))?;
    mul_div(
        amount,
        ScaledAmount::from(bps),
        ScaledAmount::from(BPS_DENOMINATOR),
        rounding,
    )
}

/// `10^exp` as a scaled amount.
///
/// # Errors
///
/// Returns `InvalidArgument` if the power exceeds 256 bits (`exp > 77`).
pub fn pow10(exp: u32) -> Result<ScaledAmount> {
    let ten = ScaledAmount::from(10u64);
    (0..exp).try_fold(ScaledAmount::from(1u64), |acc, _| {
        acc.checked_mul(ten)
            .ok_or_else(|| Error::invalid_argument(format!("10^{exp} exceeds 256 bits")))
    })
}

/// Checked `a * b`, reported as `InvalidArgument` on overflow.
pub(crate) fn checked_mul(a: ScaledAmount, b: ScaledAmount) -> Result<ScaledAmount> {
    a.checked_mul(b)
        .ok_or_else(|| Error::invalid_argument("amount product exceeds 256 bits"))
}
