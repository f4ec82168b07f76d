//! Daemon lifecycle: one-shot readiness bring-up and shutdown signals

mod bringup;
mod shutdown;

pub use bringup::spawn_bringup;
pub use shutdown::shutdown_signal;
