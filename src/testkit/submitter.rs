//! Recording transaction submitter.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{ScaledAmount, SwapQuote, VaultId, YieldAllocation};
use crate::error::{Error, Result};
use crate::port::{TransactionSignature, TransactionSubmitter};

/// A call received by [`RecordingSubmitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Swap(SwapQuote),
    Deposit { vault_id: VaultId, assets: ScaledAmount },
    Withdraw { vault_id: VaultId, shares: ScaledAmount },
    Rebalance { vault_id: VaultId, allocations: Vec<YieldAllocation> },
}

/// Records submissions and returns sequential signatures `sig-1`, `sig-2`, ...
///
/// Built with [`RecordingSubmitter::failing`] it rejects every call with
/// `TransactionBuildError` instead.
#[derive(Default)]
pub struct RecordingSubmitter {
    submissions: Mutex<Vec<Submission>>,
    failure: Option<String>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            submissions: Mutex::default(),
            failure: Some(reason.to_owned()),
        }
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().clone()
    }

    fn record(&self, submission: Submission) -> Result<TransactionSignature> {
        if let Some(reason) = &self.failure {
            return Err(Error::TransactionBuildError {
                reason: reason.clone(),
            });
        }
        let mut submissions = self.submissions.lock();
        submissions.push(submission);
        Ok(TransactionSignature::new(format!("sig-{}", submissions.len())))
    }
}

#[async_trait]
impl TransactionSubmitter for RecordingSubmitter {
    async fn submit_swap(&self, quote: &SwapQuote) -> Result<TransactionSignature> {
        self.record(Submission::Swap(quote.clone()))
    }

    async fn submit_deposit(
        &self,
        vault_id: &VaultId,
        assets: ScaledAmount,
    ) -> Result<TransactionSignature> {
        self.record(Submission::Deposit {
            vault_id: vault_id.clone(),
            assets,
        })
    }

    async fn submit_withdraw(
        &self,
        vault_id: &VaultId,
        shares: ScaledAmount,
    ) -> Result<TransactionSignature> {
        self.record(Submission::Withdraw {
            vault_id: vault_id.clone(),
            shares,
        })
    }

    async fn submit_rebalance(
        &self,
        vault_id: &VaultId,
        allocations: &[YieldAllocation],
    ) -> Result<TransactionSignature> {
        self.record(Submission::Rebalance {
            vault_id: vault_id.clone(),
            allocations: allocations.to_vec(),
        })
    }
}
