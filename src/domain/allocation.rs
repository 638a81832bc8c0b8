//! Risk-adjusted capital allocation across yield sources.
//!
//! Each eligible source is scored as `apr_bps - penalty * max(0, risk_score)`
//! and receives a share of 10 000 bps proportional to its score. The split is
//! integer-exact: floor rounding slack goes to the last source in configured
//! order, an optional per-source cap is enforced, and whatever the cap frees up
//! is handed back round-robin to sources that still have room.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::id::SourceId;
use super::math::clamp_bps;
use super::money::{BasisPoints, BPS_DENOMINATOR};
use crate::error::{Error, Result};

/// Live metrics reported by a yield source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldSourceMetrics {
    pub source_id: SourceId,
    /// Score input, not bounded to `[0, 10000]`; may be negative.
    pub apr_bps: i64,
    pub liquidity_usd: Decimal,
    pub risk_score: Decimal,
    /// Unix seconds.
    pub updated_at: i64,
}

/// A source's share of the capital, in bps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldAllocation {
    pub source_id: SourceId,
    pub weight_bps: BasisPoints,
    pub metrics: YieldSourceMetrics,
}

/// Scoring and capping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocationPolicy {
    pub risk_penalty_bps_per_point: Decimal,
    pub min_liquidity_usd: Decimal,
    pub max_single_source_bps: Option<BasisPoints>,
}

impl AllocationPolicy {
    /// Risk-adjusted score of a source, in bps.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the penalty does not fit in a `Decimal`.
    pub fn score(&self, metrics: &YieldSourceMetrics) -> Result<Decimal> {
        self.risk_penalty_bps_per_point
            .checked_mul(metrics.risk_score.max(Decimal::ZERO))
            .and_then(|penalty| Decimal::from(metrics.apr_bps).checked_sub(penalty))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "risk penalty overflows for source {}: {} bps/point * risk {}",
                    metrics.source_id, self.risk_penalty_bps_per_point, metrics.risk_score
                ))
            })
    }
}

/// Split 10 000 bps across `metrics`, preserving their order.
///
/// # Errors
///
/// - `InvalidArgument` if the cap is outside `[0, 10000]` or a score overflows.
/// - `InvariantViolation` if no source is eligible, the total score is not
///   positive, or the cap makes a full allocation impossible.
pub fn allocate(
    metrics: Vec<YieldSourceMetrics>,
    policy: &AllocationPolicy,
) -> Result<Vec<YieldAllocation>> {
    let cap = policy
        .max_single_source_bps
        .map(|cap| clamp_bps(i64::from(cap)))
        .transpose()?;

    let mut eligible: Vec<(YieldSourceMetrics, Decimal)> = Vec::new();
    for m in metrics {
        if m.liquidity_usd < policy.min_liquidity_usd {
            continue;
        }
        let score = policy.score(&m)?;
        if score > Decimal::ZERO {
            eligible.push((m, score));
        }
    }

    if eligible.is_empty() {
        return Err(Error::invariant("no eligible yield sources for routing"));
    }

    let total_score = eligible
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, score)| acc.checked_add(*score))
        .ok_or_else(|| Error::invalid_argument("total yield score overflows"))?;
    if total_score <= Decimal::ZERO {
        return Err(Error::invariant(format!(
            "total yield score is non-positive: {total_score}"
        )));
    }

    let denominator = Decimal::from(BPS_DENOMINATOR);
    let last = eligible.len() - 1;
    let mut remaining = BPS_DENOMINATOR;
    let mut allocations = Vec::with_capacity(eligible.len());

    for (i, (metrics, score)) in eligible.into_iter().enumerate() {
        let mut weight = if i == last {
            remaining
        } else {
            proportional_weight(score, total_score, denominator)?
        };

        if let Some(cap) = cap {
            weight = weight.min(cap);
        }

        weight = weight.min(remaining);
        remaining -= weight;

        allocations.push(YieldAllocation {
            source_id: metrics.source_id.clone(),
            weight_bps: weight,
            metrics,
        });
    }

    if remaining > 0 {
        let cap = cap.unwrap_or(BPS_DENOMINATOR);
        for allocation in &mut allocations {
            if remaining == 0 {
                break;
            }
            let room = cap.saturating_sub(allocation.weight_bps);
            let add = room.min(remaining);
            allocation.weight_bps += add;
            remaining -= add;
        }
    }

    let sum: BasisPoints = allocations.iter().map(|a| a.weight_bps).sum();
    if sum != BPS_DENOMINATOR {
        return Err(Error::invariant(format!(
            "yield allocation sums to {sum} bps, expected {BPS_DENOMINATOR}"
        )));
    }

    Ok(allocations)
}

fn proportional_weight(
    score: Decimal,
    total_score: Decimal,
    denominator: Decimal,
) -> Result<BasisPoints> {
    let share = score
        .checked_mul(denominator)
        .and_then(|scaled| scaled.checked_div(total_score))
        .ok_or_else(|| Error::invalid_argument(format!("weight for score {score} overflows")))?
        .floor();
    share
        .max(Decimal::ZERO)
        .to_u32()
        .ok_or_else(|| Error::invariant(format!("weight {share} is not representable")))
}

/// Allocation-weighted APR in bps, rounded half up.
#[must_use]
pub fn weighted_apr_bps(allocations: &[YieldAllocation]) -> i64 {
    let denominator = i128::from(BPS_DENOMINATOR);
    let weighted: i128 = allocations
        .iter()
        .map(|a| i128::from(a.metrics.apr_bps) * i128::from(a.weight_bps))
        .fold(0i128, i128::saturating_add);
    let rounded = weighted.saturating_add(denominator / 2).div_euclid(denominator);
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}
