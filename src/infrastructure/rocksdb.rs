use crate::domain::ports::WalletStore;
use crate::domain::wallet::{Wallet, WalletId};
use crate::error::{Result, WalletError};
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, ErrorKind, OptimisticTransactionDB, Options, Transaction,
};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing wallet records.
pub const CF_WALLETS: &str = "wallets";

/// A persistent wallet store implementation using RocksDB.
///
/// Records live in the `wallets` column family, keyed by the 16 raw bytes of the
/// wallet UUID and encoded as JSON.
///
/// Every write runs in its own optimistic transaction: the stored record is read
/// with `get_for_update`, its version compared, the new record staged and the
/// transaction committed. Returning early drops the transaction, which rolls it
/// back. A commit that loses a race against another writer surfaces as
/// `WalletError::VersionConflict`.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<OptimisticTransactionDB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<OptimisticTransactionDB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `wallets` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_wallets = ColumnFamilyDescriptor::new(CF_WALLETS, Options::default());
        let db = OptimisticTransactionDB::open_cf_descriptors(&opts, path, vec![cf_wallets])?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Reads the stored record for update, checks its version and stages the
    /// committed record. Nothing is visible until `txn` commits.
    fn stage_save(&self, txn: &WalletTxn<'_>, candidate: &Wallet) -> Result<Wallet> {
        let cf = self.wallets_cf()?;
        let key = candidate.id.as_uuid().as_bytes();

        let stored = txn
            .get_for_update_cf(cf, key, true)?
            .map(|bytes| decode(&bytes))
            .transpose()?;
        if stored.map(|w| w.version) != Some(candidate.version) {
            return Err(version_conflict(candidate));
        }

        let committed = candidate.committed();
        txn.put_cf(cf, key, encode(&committed)?)?;
        Ok(committed)
    }

    fn wallets_cf(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_WALLETS)
            .ok_or_else(|| WalletError::Storage("Wallets column family not found".to_string()))
    }
}

fn encode(wallet: &Wallet) -> Result<Vec<u8>> {
    serde_json::to_vec(wallet)
        .map_err(|e| WalletError::Storage(format!("Serialization error: {e}")))
}

fn decode(bytes: &[u8]) -> Result<Wallet> {
    serde_json::from_slice(bytes)
        .map_err(|e| WalletError::Storage(format!("Deserialization error: {e}")))
}

type WalletTxn<'a> = Transaction<'a, OptimisticTransactionDB>;

fn is_write_conflict(err: &rocksdb::Error) -> bool {
    matches!(err.kind(), ErrorKind::Busy | ErrorKind::TryAgain)
}

/// Commits `txn`, reporting a lost race against another writer as `conflict`.
fn commit_or(txn: WalletTxn<'_>, conflict: WalletError) -> Result<()> {
    match txn.commit() {
        Ok(()) => Ok(()),
        Err(e) if is_write_conflict(&e) => Err(conflict),
        Err(e) => Err(e.into()),
    }
}

fn version_conflict(candidate: &Wallet) -> WalletError {
    WalletError::VersionConflict {
        wallet_id: candidate.id,
        expected: candidate.version,
    }
}

#[async_trait]
impl WalletStore for RocksDBStore {
    async fn get(&self, id: WalletId) -> Result<Option<Wallet>> {
        let cf = self.wallets_cf()?;
        self.db
            .get_cf(cf, id.as_uuid().as_bytes())?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    async fn insert(&self, wallet: Wallet) -> Result<Wallet> {
        let cf = self.wallets_cf()?;
        let key = wallet.id.as_uuid().as_bytes();

        let txn = self.db.transaction();
        if txn.get_for_update_cf(cf, key, true)?.is_some() {
            return Err(WalletError::WalletAlreadyExists(wallet.id));
        }
        txn.put_cf(cf, key, encode(&wallet)?)?;

        // Someone else may have created the same id between our read and our commit.
        commit_or(txn, WalletError::WalletAlreadyExists(wallet.id))?;
        Ok(wallet)
    }

    async fn conditional_save(&self, candidate: Wallet) -> Result<Wallet> {
        let txn = self.db.transaction();
        let committed = self.stage_save(&txn, &candidate)?;
        commit_or(txn, version_conflict(&candidate))?;
        Ok(committed)
    }
}
