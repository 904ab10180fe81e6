use crate::domain::wallet::{Version, WalletId};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Wallet not found")]
    WalletNotFound(WalletId),

    #[error("Wallet already exists: {0}")]
    WalletAlreadyExists(WalletId),

    #[error("Insufficient funds")]
    InsufficientFunds {
        wallet_id: WalletId,
        available: Decimal,
        requested: Decimal,
    },

    /// Raised by a store when the record changed since it was read. Recovered
    /// inside the mutator and never meant to reach a caller.
    #[error("Version conflict on wallet {wallet_id}: expected version {expected}")]
    VersionConflict { wallet_id: WalletId, expected: Version },

    #[error("Wallet {wallet_id} is under heavy contention: gave up after {attempts} attempts")]
    ConcurrencyExhausted { wallet_id: WalletId, attempts: u32 },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),
}

impl WalletError {
    /// Whether the same request may succeed if the client simply sends it again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            WalletError::ConcurrencyExhausted { .. } | WalletError::VersionConflict { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
