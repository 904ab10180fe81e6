use super::{AppState, build_router};
use crate::error::Result;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub struct WalletServer {
    listener: TcpListener,
    state: AppState,
}

impl WalletServer {
    pub async fn bind(addr: SocketAddr, state: AppState) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until Ctrl-C, letting in-flight requests finish.
    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        tracing::info!(%addr, "Wallet service listening");

        axum::serve(self.listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Wallet service stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
