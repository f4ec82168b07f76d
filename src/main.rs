//! perfhintd: power hint coordination daemon
//!
//! Gates all hint processing behind a one-time asynchronous bring-up,
//! translates versioned hint identifiers into named backend actions, and
//! applies the sustained-performance override policy. The transport that
//! delivers hint calls is external; it clones the dispatcher handle built
//! here and calls straight into it.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use perfhintd::config::Config;
use perfhintd::dispatch::HintDispatcher;
use perfhintd::lifecycle;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "perfhintd starting");

    let config = Config::load();
    info!(?config.property_file, ?config.hint_config_path, "configuration loaded");

    // Spawns the detached bring-up task; hints are dropped until it finishes
    let dispatcher = HintDispatcher::start(&config);

    info!("daemon initialized, waiting for shutdown signal");
    lifecycle::shutdown_signal().await?;

    info!(ready = dispatcher.is_ready(), "perfhintd stopped");

    Ok(())
}
