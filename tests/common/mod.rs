#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Barrier;
use walletd::domain::ports::WalletStore;
use walletd::domain::wallet::{Amount, Balance, Wallet, WalletId};
use walletd::error::{Result, WalletError};
use walletd::infrastructure::in_memory::InMemoryWalletStore;

/// Inserts a wallet holding `balance` and returns its id.
pub async fn seed_wallet(store: &InMemoryWalletStore, balance: Decimal) -> WalletId {
    let wallet = Wallet {
        balance: Balance::new(balance).unwrap(),
        ..Wallet::open(WalletId::generate())
    };
    store.insert(wallet).await.unwrap().id
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

/// Counts store traffic and can hold the first few readers at a barrier so
/// that they all work from the same snapshot.
pub struct InstrumentedStore {
    pub inner: InMemoryWalletStore,
    pub gets: AtomicUsize,
    pub saves: AtomicUsize,
    pub conflicts: AtomicUsize,
    gate: Option<(Arc<Barrier>, usize)>,
}

impl InstrumentedStore {
    pub fn new(inner: InMemoryWalletStore) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            conflicts: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// The first `readers` calls to `get` wait for each other after reading.
    pub fn gated(inner: InMemoryWalletStore, readers: usize) -> Self {
        Self {
            gate: Some((Arc::new(Barrier::new(readers)), readers)),
            ..Self::new(inner)
        }
    }

    pub fn conflicts(&self) -> usize {
        self.conflicts.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletStore for InstrumentedStore {
    async fn get(&self, id: WalletId) -> Result<Option<Wallet>> {
        let n = self.gets.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.inner.get(id).await?;
        if let Some((barrier, readers)) = &self.gate {
            if n < *readers {
                barrier.wait().await;
            }
        }
        Ok(snapshot)
    }

    async fn insert(&self, wallet: Wallet) -> Result<Wallet> {
        self.inner.insert(wallet).await
    }

    async fn conditional_save(&self, candidate: Wallet) -> Result<Wallet> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let result = self.inner.conditional_save(candidate).await;
        if matches!(result, Err(WalletError::VersionConflict { .. })) {
            self.conflicts.fetch_add(1, Ordering::SeqCst);
        }
        result
    }
}

/// Commits a competing deposit right before every save it forwards, so the
/// caller's snapshot is always stale.
pub struct RivalWriterStore {
    pub inner: InMemoryWalletStore,
    pub rival_deposit: Amount,
    pub saves: AtomicUsize,
}

impl RivalWriterStore {
    pub fn new(inner: InMemoryWalletStore, rival_deposit: Amount) -> Self {
        Self {
            inner,
            rival_deposit,
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletStore for RivalWriterStore {
    async fn get(&self, id: WalletId) -> Result<Option<Wallet>> {
        self.inner.get(id).await
    }

    async fn insert(&self, wallet: Wallet) -> Result<Wallet> {
        self.inner.insert(wallet).await
    }

    async fn conditional_save(&self, candidate: Wallet) -> Result<Wallet> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if let Some(current) = self.inner.get(candidate.id).await? {
            self.inner
                .conditional_save(current.deposit(self.rival_deposit)?)
                .await?;
        }
        self.inner.conditional_save(candidate).await
    }
}
