use crate::domain::ports::SharedWalletStore;
use crate::domain::wallet::{Wallet, WalletBalance, WalletId};
use crate::error::Result;

/// Creates wallets. Deposits and withdrawals never create a wallet implicitly,
/// so this is the only way a record comes into existence.
#[derive(Clone)]
pub struct WalletProvisioner {
    store: SharedWalletStore,
}

impl WalletProvisioner {
    pub fn new(store: SharedWalletStore) -> Self {
        Self { store }
    }

    /// Opens an empty wallet, generating an id when none is given.
    pub async fn open(&self, wallet_id: Option<WalletId>) -> Result<WalletBalance> {
        let wallet_id = wallet_id.unwrap_or_else(WalletId::generate);
        let wallet = self.store.insert(Wallet::open(wallet_id)).await?;
        tracing::info!(%wallet_id, "Wallet opened");
        Ok(WalletBalance::from(&wallet))
    }
}
