//! JSON-over-HTTP surface of the wallet service.

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;

use crate::application::mutator::BalanceMutator;
use crate::application::provisioning::WalletProvisioner;
use crate::application::query::WalletQueryService;
use crate::application::retry::RetryPolicy;
use crate::domain::ports::SharedWalletStore;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub mutator: Arc<BalanceMutator>,
    pub query: Arc<WalletQueryService>,
    pub provisioner: Arc<WalletProvisioner>,
}

impl AppState {
    /// Wires all services onto the same store.
    pub fn new(store: SharedWalletStore, retry: RetryPolicy) -> Self {
        Self {
            mutator: Arc::new(BalanceMutator::new(store.clone(), retry)),
            query: Arc::new(WalletQueryService::new(store.clone())),
            provisioner: Arc::new(WalletProvisioner::new(store)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/wallet", post(handlers::operate))
        .route("/wallet/{wallet_id}", get(handlers::get_balance))
        .route("/wallets", post(handlers::open_wallet));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
