//! In-memory vault ledger.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{
    Address, PositionState, ScaledAmount, VaultAggregateState, VaultId, VaultSnapshot,
};
use crate::error::{Error, Result};
use crate::port::VaultStateReader;

/// Vaults and positions that tests can mutate between reads.
#[derive(Default)]
pub struct InMemoryVaults {
    vaults: RwLock<HashMap<VaultId, VaultSnapshot>>,
    positions: RwLock<HashMap<(VaultId, Address), PositionState>>,
    reads: AtomicUsize,
}

impl InMemoryVaults {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_vault(self, snapshot: VaultSnapshot) -> Self {
        self.vaults
            .write()
            .insert(snapshot.vault_id.clone(), snapshot);
        self
    }

    #[must_use]
    pub fn with_position(self, vault_id: &str, owner: &str, shares: ScaledAmount) -> Self {
        let position = PositionState {
            vault_id: VaultId::from(vault_id),
            owner: Address::from(owner),
            shares,
            last_updated: None,
        };
        self.positions
            .write()
            .insert((position.vault_id.clone(), position.owner.clone()), position);
        self
    }

    /// Replace the aggregate state of an existing vault.
    pub fn set_state(&self, vault_id: &VaultId, state: VaultAggregateState) {
        if let Some(snapshot) = self.vaults.write().get_mut(vault_id) {
            snapshot.state = state;
        }
    }

    /// Number of vault reads served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VaultStateReader for InMemoryVaults {
    async fn vault(&self, vault_id: &VaultId) -> Result<VaultSnapshot> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.vaults
            .read()
            .get(vault_id)
            .cloned()
            .ok_or_else(|| Error::account_parse(format!("vault account {vault_id} not found")))
    }

    async fn position(&self, vault_id: &VaultId, owner: &Address) -> Result<Option<PositionState>> {
        Ok(self
            .positions
            .read()
            .get(&(vault_id.clone(), owner.clone()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{amount, vault_snapshot, vault_state};

    #[test]
    fn state_changes_are_visible_to_the_next_read() {
        let vaults =
            InMemoryVaults::new().with_vault(vault_snapshot("v", "USDC", vault_state(10, 10)));
        let id = VaultId::from("v");

        vaults.set_state(&id, vault_state(30, 10));
        let snapshot = tokio_test::block_on(vaults.vault(&id)).unwrap();

        assert_eq!(snapshot.state.total_assets, amount(30));
        assert_eq!(vaults.reads(), 1);
    }

    #[test]
    fn unknown_owner_has_no_position() {
        let vaults = InMemoryVaults::new().with_position("v", "alice", amount(5));
        let position =
            tokio_test::block_on(vaults.position(&VaultId::from("v"), &Address::from("bob")))
                .unwrap();
        assert!(position.is_none());
    }
}
