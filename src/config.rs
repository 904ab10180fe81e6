use crate::application::retry::RetryPolicy;
use crate::error::{Result, WalletError};
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime configuration of the wallet service.
///
/// Every field has a default, so a TOML file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// RocksDB directory. `None` keeps wallets in memory.
    pub db_path: Option<PathBuf>,
    pub retry: RetryConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            db_path: None,
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            backoff_ms: RetryPolicy::DEFAULT_BACKOFF.as_millis() as u64,
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WalletError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validates the retry section and turns it into a [`RetryPolicy`].
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.backoff_ms),
        )
    }
}
