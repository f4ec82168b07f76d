//! Signal handling for daemon shutdown

use anyhow::Result;
use tokio::signal::unix::{signal, SignalKind};
use tracing::debug;

/// Wait for SIGTERM or SIGINT
pub async fn shutdown_signal() -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            debug!("received SIGTERM");
        }
        _ = sigint.recv() => {
            debug!("received SIGINT");
        }
    }

    Ok(())
}
