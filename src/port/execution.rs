//! Transaction submission port.
//!
//! Building, signing and sending transactions happens outside the crate. The
//! services hand over fully computed values and receive a signature back.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{ScaledAmount, SwapQuote, VaultId, YieldAllocation};
use crate::error::Result;

/// Signature of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionSignature(String);

impl TransactionSignature {
    pub fn new(signature: impl Into<String>) -> Self {
        Self(signature.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds and submits state-changing transactions.
///
/// Implementations report build failures as `TransactionBuildError`.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit_swap(&self, quote: &SwapQuote) -> Result<TransactionSignature>;

    async fn submit_deposit(
        &self,
        vault_id: &VaultId,
        assets: ScaledAmount,
    ) -> Result<TransactionSignature>;

    async fn submit_withdraw(
        &self,
        vault_id: &VaultId,
        shares: ScaledAmount,
    ) -> Result<TransactionSignature>;

    async fn submit_rebalance(
        &self,
        vault_id: &VaultId,
        allocations: &[YieldAllocation],
    ) -> Result<TransactionSignature>;
}
