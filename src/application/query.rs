use crate::domain::ports::SharedWalletStore;
use crate::domain::wallet::{WalletBalance, WalletId};
use crate::error::{Result, WalletError};

/// Read-only balance lookups. Reflects the latest snapshot the store exposes.
#[derive(Clone)]
pub struct WalletQueryService {
    store: SharedWalletStore,
}

impl WalletQueryService {
    pub fn new(store: SharedWalletStore) -> Self {
        Self { store }
    }

    pub async fn get_balance(&self, wallet_id: WalletId) -> Result<WalletBalance> {
        self.store
            .get(wallet_id)
            .await?
            .map(|wallet| WalletBalance::from(&wallet))
            .ok_or(WalletError::WalletNotFound(wallet_id))
    }
}
