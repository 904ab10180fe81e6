use super::retry::RetryPolicy;
use crate::domain::operation::{OperationType, WalletOperation};
use crate::domain::ports::SharedWalletStore;
use crate::domain::wallet::{Amount, WalletBalance, WalletId};
use crate::error::{Result, WalletError};

/// Applies deposits and withdrawals to wallets.
///
/// `BalanceMutator` holds no locks of its own. Each attempt reads a fresh
/// snapshot, computes the new balance, and hands it to the store's
/// `conditional_save`. When another writer got there first the store reports a
/// version conflict and the whole attempt is re-run under the [`RetryPolicy`].
#[derive(Clone)]
pub struct BalanceMutator {
    store: SharedWalletStore,
    retry: RetryPolicy,
}

impl BalanceMutator {
    /// Creates a new `BalanceMutator`.
    ///
    /// # Arguments
    ///
    /// * `store` - The store holding versioned wallet records.
    /// * `retry` - How many conflicting attempts to tolerate per operation.
    pub fn new(store: SharedWalletStore, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    pub async fn deposit(&self, wallet_id: WalletId, amount: Amount) -> Result<WalletBalance> {
        self.mutate(wallet_id, OperationType::Deposit, amount).await
    }

    /// Withdraws `amount`, failing with `InsufficientFunds` rather than letting the
    /// balance go negative. The funds check is made against the same snapshot
    /// that the conditional save is based on.
    pub async fn withdraw(&self, wallet_id: WalletId, amount: Amount) -> Result<WalletBalance> {
        self.mutate(wallet_id, OperationType::Withdraw, amount).await
    }

    pub async fn apply(&self, operation: WalletOperation) -> Result<WalletBalance> {
        self.mutate(
            operation.wallet_id,
            operation.operation_type,
            operation.amount,
        )
        .await
    }

    async fn mutate(
        &self,
        wallet_id: WalletId,
        operation_type: OperationType,
        amount: Amount,
    ) -> Result<WalletBalance> {
        self.retry
            .run(wallet_id, |attempt| {
                self.attempt(wallet_id, operation_type, amount, attempt)
            })
            .await
    }

    async fn attempt(
        &self,
        wallet_id: WalletId,
        operation_type: OperationType,
        amount: Amount,
        attempt: u32,
    ) -> Result<WalletBalance> {
        let snapshot = self
            .store
            .get(wallet_id)
            .await?
            .ok_or(WalletError::WalletNotFound(wallet_id))?;

        let candidate = match operation_type {
            OperationType::Deposit => snapshot.deposit(amount),
            OperationType::Withdraw => snapshot.withdraw(amount),
        }
        .inspect_err(|e| {
            tracing::debug!(%wallet_id, %operation_type, amount = %amount.value(), "Rejected: {e}");
        })?;

        let committed = self.store.conditional_save(candidate).await?;
        tracing::debug!(
            %wallet_id,
            %operation_type,
            amount = %amount.value(),
            balance = %committed.balance,
            version = %committed.version,
            attempt,
            "Balance updated"
        );
        Ok(WalletBalance::from(&committed))
    }
}
