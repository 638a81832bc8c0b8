//! Yield routing across configured sources.

use std::sync::Arc;

use futures_util::future::try_join_all;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::math::clamp_bps;
use crate::domain::{allocate, AllocationPolicy, AssetId, BasisPoints, VaultId, YieldAllocation};
use crate::error::{Error, Result};
use crate::port::{TransactionSignature, TransactionSubmitter, YieldSource};

/// Scoring parameters for [`YieldRouter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YieldRouterConfig {
    pub risk_penalty_bps_per_point: Decimal,
    pub min_liquidity_usd: Decimal,
    pub max_single_source_bps: Option<BasisPoints>,
}

impl From<YieldRouterConfig> for AllocationPolicy {
    fn from(config: YieldRouterConfig) -> Self {
        Self {
            risk_penalty_bps_per_point: config.risk_penalty_bps_per_point,
            min_liquidity_usd: config.min_liquidity_usd,
            max_single_source_bps: config.max_single_source_bps,
        }
    }
}

/// Splits capital across yield sources by risk-adjusted APR.
pub struct YieldRouter {
    sources: Vec<Arc<dyn YieldSource>>,
    policy: AllocationPolicy,
    submitter: Option<Arc<dyn TransactionSubmitter>>,
}

impl std::fmt::Debug for YieldRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YieldRouter")
            .field("sources", &self.sources.iter().map(|s| s.id()).collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl YieldRouter {
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `sources` is empty, the penalty or
    /// minimum liquidity is negative, or the cap is outside `[0, 10000]`.
    pub fn new(sources: Vec<Arc<dyn YieldSource>>, config: YieldRouterConfig) -> Result<Self> {
        if sources.is_empty() {
            return Err(Error::invalid_argument(
                "yield router requires at least one source",
            ));
        }
        if config.risk_penalty_bps_per_point < Decimal::ZERO {
            return Err(Error::invalid_argument(
                "risk_penalty_bps_per_point must be >= 0",
            ));
        }
        if config.min_liquidity_usd < Decimal::ZERO {
            return Err(Error::invalid_argument("min_liquidity_usd must be >= 0"));
        }
        if let Some(cap) = config.max_single_source_bps {
            clamp_bps(i64::from(cap))?;
        }

        Ok(Self {
            sources,
            policy: config.into(),
            submitter: None,
        })
    }

    /// Enable [`YieldRouter::rebalance`].
    #[must_use]
    pub fn with_submitter(mut self, submitter: Arc<dyn TransactionSubmitter>) -> Self {
        self.submitter = Some(submitter);
        self
    }

    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn YieldSource>] {
        &self.sources
    }

    /// Allocation of 10 000 bps across sources for `asset`.
    ///
    /// Metrics are fetched from every source concurrently; the first failure
    /// fails the route.
    pub async fn optimal_route(&self, asset: &AssetId) -> Result<Vec<YieldAllocation>> {
        let metrics =
            try_join_all(self.sources.iter().map(|source| source.metrics(asset))).await?;
        let route = allocate(metrics, &self.policy)?;

        debug!(
            asset = %asset,
            sources = self.sources.len(),
            eligible = route.len(),
            "Computed yield route"
        );
        Ok(route)
    }

    /// Compute the route for `asset` and submit it for `vault_id`.
    ///
    /// # Errors
    ///
    /// Returns `UnauthorizedAuthority` when no submitter is configured.
    pub async fn rebalance(
        &self,
        vault_id: &VaultId,
        asset: &AssetId,
    ) -> Result<(TransactionSignature, Vec<YieldAllocation>)> {
        let submitter = self
            .submitter
            .as_ref()
            .ok_or_else(|| Error::unauthorized("rebalance requires a transaction submitter"))?;

        let route = self.optimal_route(asset).await?;
        let signature = submitter.submit_rebalance(vault_id, &route).await?;
        info!(
            vault = %vault_id,
            asset = %asset,
            legs = route.len(),
            signature = %signature,
            "Rebalance submitted"
        );
        Ok((signature, route))
    }
}
