//! Storage backends implementing [`WalletStore`](crate::domain::ports::WalletStore).

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

use crate::domain::ports::SharedWalletStore;
use crate::error::Result;
use in_memory::InMemoryWalletStore;
use std::path::Path;
use std::sync::Arc;

/// Opens the store selected by configuration.
///
/// A `db_path` selects RocksDB. Without the `storage-rocksdb` feature the path is
/// ignored with a warning and the in-memory store is used instead.
pub fn open_store(db_path: Option<&Path>) -> Result<SharedWalletStore> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            tracing::info!(path = %path.display(), "Opening RocksDB wallet store");
            Ok(Arc::new(self::rocksdb::RocksDBStore::open(path)?))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(path) => {
            tracing::warn!(
                path = %path.display(),
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Arc::new(InMemoryWalletStore::new()))
        }
        None => Ok(Arc::new(InMemoryWalletStore::new())),
    }
}
