//! Application layer containing the wallet use cases.
//!
//! [`mutator::BalanceMutator`] owns the concurrency protocol for deposits and
//! withdrawals: optimistic compare-and-swap against the store, re-run under the
//! bounded [`retry::RetryPolicy`] whenever another writer commits first.
//! Reads go through [`query::WalletQueryService`] and wallet creation through
//! [`provisioning::WalletProvisioner`].

pub mod mutator;
pub mod provisioning;
pub mod query;
pub mod retry;
