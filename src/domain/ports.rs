use super::wallet::{Wallet, WalletId};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Versioned record holder for wallets.
///
/// A store is deliberately dumb: it never inspects balances. Its one job under
/// concurrency is to make `conditional_save` an atomic compare-and-swap on
/// `Wallet::version`, so that two writers working from the same snapshot can
/// never both commit.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Returns the latest committed snapshot, or `None` if no such wallet exists.
    async fn get(&self, id: WalletId) -> Result<Option<Wallet>>;

    /// Persists a new wallet.
    ///
    /// Fails with `WalletError::WalletAlreadyExists` if the id is taken.
    async fn insert(&self, wallet: Wallet) -> Result<Wallet>;

    /// Commits `candidate` if the stored version still equals `candidate.version`.
    ///
    /// On success the stored version is incremented and the committed record is
    /// returned. If the stored record changed (or vanished) since it was read,
    /// fails with `WalletError::VersionConflict` and leaves the store untouched.
    async fn conditional_save(&self, candidate: Wallet) -> Result<Wallet>;
}

pub type SharedWalletStore = Arc<dyn WalletStore>;
