//! Swap quote computation.
//!
//! An input amount is converted through a [`CrossRate`], then worsened by the
//! spread, then by the protocol fee (a percentage of the post-spread amount).
//! The slippage tolerance is applied last to derive the minimum output that
//! execution must honor. Every step rounds down.

use serde::Serialize;

use super::cross_rate::CrossRate;
use super::id::{Address, AssetId};
use super::math::{apply_bps, checked_mul, clamp_bps, mul_div, pow10, Rounding};
use super::money::{BasisPoints, ScaledAmount};
use super::oracle::OracleKind;
use crate::error::{Error, Result};

/// Caller inputs for a quote. Bps values are validated when quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub from_asset: AssetId,
    pub to_asset: AssetId,
    pub amount_in: ScaledAmount,
    pub slippage_bps: i64,
    pub fee_bps: i64,
    pub spread_bps: i64,
}

impl QuoteRequest {
    /// Check the caller inputs without touching any price.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when any bps value is outside `[0, 10000]` or
    /// when `amount_in` is zero.
    pub fn validate(&self) -> Result<()> {
        clamp_bps(self.slippage_bps)?;
        clamp_bps(self.fee_bps)?;
        clamp_bps(self.spread_bps)?;
        if self.amount_in.is_zero() {
            return Err(Error::invalid_argument("amount_in must be > 0"));
        }
        Ok(())
    }
}

/// Oracle attribution carried on a quote for audit and replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OracleSnapshot {
    pub kind: OracleKind,
    pub feed: Address,
    pub publish_time: i64,
    pub confidence: u64,
    pub exponent: i32,
}

/// An executable swap quote.
///
/// Built only by [`quote`], which guarantees `min_out_amount <= out_amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub from_asset: AssetId,
    pub to_asset: AssetId,
    pub in_amount: ScaledAmount,
    pub out_amount: ScaledAmount,
    pub min_out_amount: ScaledAmount,
    /// `out ~= in * price * 10^price_exponent`.
    pub price: ScaledAmount,
    pub price_exponent: i32,
    pub fee_bps: BasisPoints,
    pub spread_bps: BasisPoints,
    pub slippage_bps: BasisPoints,
    pub oracle: OracleSnapshot,
}

/// Convert `amount` through `rate` without any fee or spread.
///
/// # Errors
///
/// Returns `InvalidArgument` if the result does not fit in 256 bits.
pub fn convert(amount: ScaledAmount, rate: &CrossRate) -> Result<ScaledAmount> {
    if rate.exponent >= 0 {
        let scale = pow10(rate.exponent.unsigned_abs())?;
        checked_mul(checked_mul(amount, rate.scaled_ratio)?, scale)
    } else {
        let denom = pow10(rate.exponent.unsigned_abs())?;
        mul_div(amount, rate.scaled_ratio, denom, Rounding::Down)
    }
}

/// Build a quote for `request` at `rate`.
///
/// # Errors
///
/// Returns `InvalidArgument` when any bps value is outside `[0, 10000]`, when
/// `amount_in` is zero, or when the conversion overflows.
pub fn quote(request: &QuoteRequest, rate: &CrossRate) -> Result<SwapQuote> {
    request.validate()?;
    let slippage_bps = clamp_bps(request.slippage_bps)?;
    let fee_bps = clamp_bps(request.fee_bps)?;
    let spread_bps = clamp_bps(request.spread_bps)?;

    let raw_out = convert(request.amount_in, rate)?;
    let after_spread = apply_bps(raw_out, spread_bps, Rounding::Down)?;
    let out_amount = apply_bps(after_spread, fee_bps, Rounding::Down)?;
    let min_out_amount = apply_bps(out_amount, slippage_bps, Rounding::Down)?;

    let source = &rate.source_price;
    Ok(SwapQuote {
        from_asset: request.from_asset.clone(),
        to_asset: request.to_asset.clone(),
        in_amount: request.amount_in,
        out_amount,
        min_out_amount,
        price: rate.scaled_ratio,
        price_exponent: rate.exponent,
        fee_bps,
        spread_bps,
        slippage_bps,
        oracle: OracleSnapshot {
            kind: source.kind,
            feed: source.feed.clone(),
            publish_time: source.publish_time,
            confidence: source.confidence,
            exponent: source.exponent,
        },
    })
}

/// Execution-time re-check of a quote that may have been stored or altered.
///
/// # Errors
///
/// Returns `InvalidSlippage` when `min_out_amount > out_amount`.
pub fn ensure_executable(quote: &SwapQuote) -> Result<()> {
    if quote.min_out_amount > quote.out_amount {
        return Err(Error::InvalidSlippage {
            min_out: quote.min_out_amount,
            out: quote.out_amount,
        });
    }
    Ok(())
}
