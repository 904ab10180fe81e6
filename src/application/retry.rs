//! Bounded retry on optimistic-locking conflicts.

use crate::domain::wallet::WalletId;
use crate::error::{Result, WalletError};
use std::future::Future;
use std::time::Duration;

/// How many times a read-check-write attempt may be run before giving up.
///
/// Only `WalletError::VersionConflict` is retried. Any other outcome, success or
/// failure, is returned from the attempt that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(25);

    /// `max_attempts` counts the first attempt, so it must be at least 1.
    pub fn new(max_attempts: u32, backoff: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(WalletError::Config(
                "retry max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            backoff,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Runs `attempt` until it stops reporting a version conflict.
    ///
    /// `attempt` receives the 1-based attempt number and must re-read whatever
    /// state it depends on each time it is called.
    pub async fn run<T, F, Fut>(&self, wallet_id: WalletId, mut attempt: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        for n in 1..=self.max_attempts {
            match attempt(n).await {
                Err(WalletError::VersionConflict { expected, .. }) => {
                    tracing::debug!(
                        %wallet_id,
                        attempt = n,
                        max_attempts = self.max_attempts,
                        expected_version = %expected,
                        "Concurrent update detected"
                    );
                    if n < self.max_attempts && !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                outcome => return outcome,
            }
        }

        tracing::warn!(
            %wallet_id,
            attempts = self.max_attempts,
            "Giving up after repeated version conflicts"
        );
        Err(WalletError::ConcurrencyExhausted {
            wallet_id,
            attempts: self.max_attempts,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            backoff: Self::DEFAULT_BACKOFF,
        }
    }
}
