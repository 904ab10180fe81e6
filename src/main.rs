use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use walletd::config::ServiceConfig;
use walletd::infrastructure::open_store;
use walletd::interfaces::http::AppState;
use walletd::interfaces::http::server::WalletServer;
use walletd::logging;

#[derive(Parser)]
#[command(author, version, about = "Wallet balance service", long_about = None)]
struct Cli {
    /// TOML configuration file. Flags given on the command line take precedence.
    #[arg(long, env = "WALLETD_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(long, env = "WALLETD_BIND")]
    bind: Option<SocketAddr>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "WALLETD_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Attempts per operation before reporting the wallet as busy
    #[arg(long, env = "WALLETD_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Pause between conflicting attempts, in milliseconds
    #[arg(long, env = "WALLETD_RETRY_BACKOFF_MS")]
    retry_backoff_ms: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load(path).into_diagnostic()?,
            None => ServiceConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(db_path) = self.db_path {
            config.db_path = Some(db_path);
        }
        if let Some(max_attempts) = self.max_attempts {
            config.retry.max_attempts = max_attempts;
        }
        if let Some(backoff_ms) = self.retry_backoff_ms {
            config.retry.backoff_ms = backoff_ms;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Cli::parse().into_config()?;
    let retry = config.retry_policy().into_diagnostic()?;
    let store = open_store(config.db_path.as_deref()).into_diagnostic()?;

    tracing::info!(
        bind = %config.bind_addr,
        max_attempts = retry.max_attempts(),
        backoff_ms = retry.backoff().as_millis() as u64,
        persistent = config.db_path.is_some(),
        "Starting wallet service"
    );

    let server = WalletServer::bind(config.bind_addr, AppState::new(store, retry))
        .await
        .into_diagnostic()?;
    server.run().await.into_diagnostic()
}
