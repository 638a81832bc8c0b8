//! Vault reads, share previews and deposit/withdraw submission.

use std::sync::Arc;

use tracing::{debug, info};

use super::yield_router::YieldRouter;
use crate::domain::{
    preview_deposit, preview_withdraw, validate_state, weighted_apr_bps, Address, ScaledAmount,
    VaultId, VaultSnapshot,
};
use crate::error::{Error, Result};
use crate::port::{TransactionSignature, TransactionSubmitter, VaultStateReader};

/// Vault operations over freshly read ledger state.
///
/// Nothing is cached: every call reads the vault again, so consecutive
/// previews may differ if the ledger moved in between.
pub struct VaultService {
    reader: Arc<dyn VaultStateReader>,
    yield_router: Option<Arc<YieldRouter>>,
    submitter: Option<Arc<dyn TransactionSubmitter>>,
}

impl VaultService {
    pub fn new(reader: Arc<dyn VaultStateReader>) -> Self {
        Self {
            reader,
            yield_router: None,
            submitter: None,
        }
    }

    /// Enable [`VaultService::apr_bps`].
    #[must_use]
    pub fn with_yield_router(mut self, router: Arc<YieldRouter>) -> Self {
        self.yield_router = Some(router);
        self
    }

    /// Enable deposits and withdrawals.
    #[must_use]
    pub fn with_submitter(mut self, submitter: Arc<dyn TransactionSubmitter>) -> Self {
        self.submitter = Some(submitter);
        self
    }

    /// Read and validate the vault.
    pub async fn state(&self, vault_id: &VaultId) -> Result<VaultSnapshot> {
        let snapshot = self.reader.vault(vault_id).await?;
        validate_state(&snapshot.state)?;
        Ok(snapshot)
    }

    pub async fn preview_deposit(
        &self,
        vault_id: &VaultId,
        assets: ScaledAmount,
    ) -> Result<ScaledAmount> {
        let snapshot = self.state(vault_id).await?;
        let shares = preview_deposit(&snapshot.state, assets)?;
        debug!(vault = %vault_id, assets = %assets, shares = %shares, "Previewed deposit");
        Ok(shares)
    }

    pub async fn preview_withdraw(
        &self,
        vault_id: &VaultId,
        shares: ScaledAmount,
    ) -> Result<ScaledAmount> {
        let snapshot = self.state(vault_id).await?;
        let assets = preview_withdraw(&snapshot.state, shares)?;
        debug!(vault = %vault_id, shares = %shares, assets = %assets, "Previewed withdraw");
        Ok(assets)
    }

    /// Total value locked, in the vault asset's smallest unit.
    pub async fn tvl(&self, vault_id: &VaultId) -> Result<ScaledAmount> {
        Ok(self.state(vault_id).await?.state.total_assets)
    }

    /// Current value of `owner`'s position; zero when they hold none.
    pub async fn position_value(
        &self,
        vault_id: &VaultId,
        owner: &Address,
    ) -> Result<ScaledAmount> {
        let snapshot = self.state(vault_id).await?;
        match self.reader.position(vault_id, owner).await? {
            Some(position) => position.value(&snapshot.state),
            None => Ok(ScaledAmount::ZERO),
        }
    }

    /// APR of the vault's current optimal yield route, in bps.
    ///
    /// # Errors
    ///
    /// Returns `ProgramNotConfigured` when no yield router is attached or the
    /// route cannot be computed; the routing failure is kept as the cause.
    pub async fn apr_bps(&self, vault_id: &VaultId) -> Result<i64> {
        let router = self
            .yield_router
            .as_ref()
            .ok_or_else(|| Error::not_configured("vault APR requires a yield router"))?;

        let snapshot = self.state(vault_id).await?;
        let route = router
            .optimal_route(&snapshot.asset)
            .await
            .map_err(|cause| Error::ProgramNotConfigured {
                reason: format!("unable to compute APR for vault {vault_id}"),
                cause: Some(Box::new(cause)),
            })?;
        Ok(weighted_apr_bps(&route))
    }

    /// Preview, then submit a deposit. Returns the signature and the shares
    /// the preview expected to mint.
    pub async fn deposit(
        &self,
        vault_id: &VaultId,
        assets: ScaledAmount,
    ) -> Result<(TransactionSignature, ScaledAmount)> {
        let submitter = self.require_submitter("deposit")?;
        let shares = self.preview_deposit(vault_id, assets).await?;
        let signature = submitter.submit_deposit(vault_id, assets).await?;
        info!(
            vault = %vault_id,
            assets = %assets,
            shares = %shares,
            signature = %signature,
            "Deposit submitted"
        );
        Ok((signature, shares))
    }

    /// Preview, then submit a withdrawal. Returns the signature and the
    /// assets the preview expected to release.
    pub async fn withdraw(
        &self,
        vault_id: &VaultId,
        shares: ScaledAmount,
    ) -> Result<(TransactionSignature, ScaledAmount)> {
        let submitter = self.require_submitter("withdraw")?;
        let assets = self.preview_withdraw(vault_id, shares).await?;
        let signature = submitter.submit_withdraw(vault_id, shares).await?;
        info!(
            vault = %vault_id,
            shares = %shares,
            assets = %assets,
            signature = %signature,
            "Withdraw submitted"
        );
        Ok((signature, assets))
    }

    fn require_submitter(&self, action: &str) -> Result<&Arc<dyn TransactionSubmitter>> {
        self.submitter
            .as_ref()
            .ok_or_else(|| Error::unauthorized(format!("{action} requires a transaction submitter")))
    }
}
