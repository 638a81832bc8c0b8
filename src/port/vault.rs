//! Vault state port.

use async_trait::async_trait;

use crate::domain::{Address, PositionState, VaultId, VaultSnapshot};
use crate::error::Result;

/// Reads vault and position accounts from the ledger.
///
/// Every call must reflect current ledger state; callers never cache results.
#[async_trait]
pub trait VaultStateReader: Send + Sync {
    async fn vault(&self, vault_id: &VaultId) -> Result<VaultSnapshot>;

    /// The owner's position, or `None` if they hold none.
    async fn position(&self, vault_id: &VaultId, owner: &Address) -> Result<Option<PositionState>>;
}
