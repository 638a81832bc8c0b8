//! Share accounting for single-asset vaults.
//!
//! Shares are minted and burned against the vault's net asset value. All
//! conversions round down, so a deposit followed by an immediate withdrawal
//! can never return more than was put in.
//!
//! # Examples
//!
//! ```
//! use laserium::domain::money::ScaledAmount;
//! use laserium::domain::vault::{preview_deposit, preview_withdraw, VaultAggregateState};
//!
//! let state = VaultAggregateState::new(ScaledAmount::from(1_000u64), ScaledAmount::from(500u64));
//! let shares = preview_deposit(&state, ScaledAmount::from(100u64)).unwrap();
//! assert_eq!(shares, ScaledAmount::from(50u64));
//! assert_eq!(preview_withdraw(&state, shares).unwrap(), ScaledAmount::from(100u64));
//! ```

use super::id::{Address, AssetId, VaultId};
use super::math::{mul_div, Rounding};
use super::money::{BasisPoints, ScaledAmount, BPS_DENOMINATOR};
use crate::error::{Error, Result};

/// Aggregate vault figures, read fresh from the ledger before every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VaultAggregateState {
    pub total_assets: ScaledAmount,
    pub total_shares: ScaledAmount,
    pub capacity_assets: Option<ScaledAmount>,
    pub utilization_bps: Option<BasisPoints>,
}

impl VaultAggregateState {
    #[must_use]
    pub const fn new(total_assets: ScaledAmount, total_shares: ScaledAmount) -> Self {
        Self {
            total_assets,
            total_shares,
            capacity_assets: None,
            utilization_bps: None,
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: ScaledAmount) -> Self {
        self.capacity_assets = Some(capacity);
        self
    }

    #[must_use]
    pub fn with_utilization(mut self, utilization_bps: BasisPoints) -> Self {
        self.utilization_bps = Some(utilization_bps);
        self
    }

    fn is_empty(&self) -> bool {
        self.total_shares.is_zero() || self.total_assets.is_zero()
    }
}

/// A vault as returned by a state reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSnapshot {
    pub vault_id: VaultId,
    pub asset: AssetId,
    pub state: VaultAggregateState,
    pub last_updated: Option<i64>,
}

/// A depositor's holding in a vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionState {
    pub vault_id: VaultId,
    pub owner: Address,
    pub shares: ScaledAmount,
    pub last_updated: Option<i64>,
}

impl PositionState {
    /// Assets redeemable for this position right now. An empty position is
    /// worth zero rather than an error.
    pub fn value(&self, state: &VaultAggregateState) -> Result<ScaledAmount> {
        if self.shares.is_zero() {
            return Ok(ScaledAmount::ZERO);
        }
        preview_withdraw(state, self.shares)
    }
}

/// Check the vault's structural invariants.
///
/// # Errors
///
/// Returns `InvariantViolation` when a vault with no shares reports assets, or
/// when utilization lies outside `[0, 10000]`.
pub fn validate_state(state: &VaultAggregateState) -> Result<()> {
    if state.total_shares.is_zero() && !state.total_assets.is_zero() {
        return Err(Error::invariant(format!(
            "empty vault must have total_assets = 0, got {}",
            state.total_assets
        )));
    }
    if let Some(utilization) = state.utilization_bps {
        if utilization > BPS_DENOMINATOR {
            return Err(Error::invariant(format!(
                "utilization_bps out of range: {utilization}"
            )));
        }
    }
    Ok(())
}

/// Shares minted for depositing `assets`.
///
/// The first deposit into an empty vault mints shares 1:1.
///
/// # Errors
///
/// - `InvariantViolation` if the state is malformed.
/// - `InvalidArgument` if `assets` is zero.
/// - `VaultCapacityExceeded` if the deposit would exceed capacity.
/// - `InvalidShareConversion` if the deposit is too small to mint a share.
pub fn preview_deposit(state: &VaultAggregateState, assets: ScaledAmount) -> Result<ScaledAmount> {
    validate_state(state)?;

    if assets.is_zero() {
        return Err(Error::invalid_argument("deposit amount must be > 0"));
    }

    if let Some(capacity) = state.capacity_assets {
        let exceeded = state
            .total_assets
            .checked_add(assets)
            .map_or(true, |next| next > capacity);
        if exceeded {
            return Err(Error::VaultCapacityExceeded {
                total_assets: state.total_assets,
                deposit: assets,
                capacity,
            });
        }
    }

    if state.is_empty() {
        return Ok(assets);
    }

    let shares = mul_div(assets, state.total_shares, state.total_assets, Rounding::Down)?;
    if shares.is_zero() {
        return Err(Error::InvalidShareConversion {
            reason: format!("deposit of {assets} results in zero shares"),
        });
    }
    Ok(shares)
}

/// Assets returned for burning `shares`.
///
/// # Errors
///
/// - `InvariantViolation` if the state is malformed.
/// - `InvalidArgument` if `shares` is zero.
/// - `VaultInsolvent` if the vault is empty or would pay out more than it holds.
/// - `InvalidShareConversion` if the withdrawal rounds to zero assets.
pub fn preview_withdraw(state: &VaultAggregateState, shares: ScaledAmount) -> Result<ScaledAmount> {
    validate_state(state)?;

    if shares.is_zero() {
        return Err(Error::invalid_argument("withdraw share amount must be > 0"));
    }

    if state.is_empty() {
        return Err(Error::VaultInsolvent {
            reason: "vault has no liquidity".into(),
        });
    }

    let assets = mul_div(shares, state.total_assets, state.total_shares, Rounding::Down)?;
    if assets.is_zero() {
        return Err(Error::InvalidShareConversion {
            reason: format!("withdrawal of {shares} shares results in zero assets"),
        });
    }

    // Reachable only when more shares are burned than exist.
    if assets > state.total_assets {
        return Err(Error::VaultInsolvent {
            reason: format!(
                "withdrawal of {assets} exceeds vault assets {}",
                state.total_assets
            ),
        });
    }

    Ok(assets)
}
