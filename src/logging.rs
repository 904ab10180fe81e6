//! Structured logging setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Installs the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when set, e.g. `RUST_LOG=walletd=debug` to
/// see every conflict and commit made by the balance mutator. Calling this more
/// than once is harmless; only the first call installs a subscriber.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Structured logging initialized");
    }
}
