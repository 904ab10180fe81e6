use crate::domain::ports::WalletStore;
use crate::domain::wallet::{Wallet, WalletId};
use crate::error::{Result, WalletError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory wallet store.
///
/// Uses `Arc<RwLock<HashMap<WalletId, Wallet>>>` to allow shared concurrent access.
/// Version checks and writes happen under the write lock, which makes
/// `conditional_save` atomic with respect to every other call on the store.
#[derive(Default, Clone)]
pub struct InMemoryWalletStore {
    wallets: Arc<RwLock<HashMap<WalletId, Wallet>>>,
}

impl InMemoryWalletStore {
    /// Creates a new, empty in-memory wallet store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn get(&self, id: WalletId) -> Result<Option<Wallet>> {
        let wallets = self.wallets.read().await;
        Ok(wallets.get(&id).cloned())
    }

    async fn insert(&self, wallet: Wallet) -> Result<Wallet> {
        let mut wallets = self.wallets.write().await;
        match wallets.entry(wallet.id) {
            Entry::Occupied(_) => Err(WalletError::WalletAlreadyExists(wallet.id)),
            Entry::Vacant(slot) => Ok(slot.insert(wallet).clone()),
        }
    }

    async fn conditional_save(&self, candidate: Wallet) -> Result<Wallet> {
        let mut wallets = self.wallets.write().await;
        match wallets.get_mut(&candidate.id) {
            Some(stored) if stored.version == candidate.version => {
                *stored = candidate.committed();
                Ok(stored.clone())
            }
            _ => Err(WalletError::VersionConflict {
                wallet_id: candidate.id,
                expected: candidate.version,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wallet::{Amount, Version};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_insert_and_get() {
        let store = InMemoryWalletStore::new();
        let wallet = Wallet::open(WalletId::generate());

        store.insert(wallet.clone()).await.unwrap();
        let retrieved = store.get(wallet.id).await.unwrap().unwrap();
        assert_eq!(retrieved, wallet);

        assert!(store.get(WalletId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_insert_duplicate() {
        let store = InMemoryWalletStore::new();
        let wallet = Wallet::open(WalletId::generate());

        store.insert(wallet.clone()).await.unwrap();
        let result = store.insert(wallet.clone()).await;
        assert!(matches!(result, Err(WalletError::WalletAlreadyExists(id)) if id == wallet.id));
    }

    #[tokio::test]
    async fn test_conditional_save_bumps_version() {
        let store = InMemoryWalletStore::new();
        let wallet = store.insert(Wallet::open(WalletId::generate())).await.unwrap();

        let candidate = wallet.deposit(Amount::new(dec!(10.00)).unwrap()).unwrap();
        let committed = store.conditional_save(candidate).await.unwrap();

        assert_eq!(committed.version, Version::new(1));
        assert_eq!(committed.balance.value(), dec!(10.00));
        assert_eq!(store.get(wallet.id).await.unwrap().unwrap(), committed);
    }

    #[tokio::test]
    async fn test_conditional_save_rejects_stale_snapshot() {
        let store = InMemoryWalletStore::new();
        let snapshot = store.insert(Wallet::open(WalletId::generate())).await.unwrap();
        let amount = Amount::new(dec!(5.00)).unwrap();

        // Two writers read the same snapshot; only the first may commit.
        store
            .conditional_save(snapshot.deposit(amount).unwrap())
            .await
            .unwrap();
        let result = store.conditional_save(snapshot.deposit(amount).unwrap()).await;

        assert!(matches!(
            result,
            Err(WalletError::VersionConflict { expected, .. }) if expected == Version::INITIAL
        ));
        let stored = store.get(snapshot.id).await.unwrap().unwrap();
        assert_eq!(stored.balance.value(), dec!(5.00));
        assert_eq!(stored.version, Version::new(1));
    }

    #[tokio::test]
    async fn test_conditional_save_on_missing_wallet() {
        let store = InMemoryWalletStore::new();
        let result = store
            .conditional_save(Wallet::open(WalletId::generate()))
            .await;
        assert!(matches!(result, Err(WalletError::VersionConflict { .. })));
    }
}
