//! One-shot readiness bring-up
//!
//! Runs detached from the dispatcher's creator and is never joined. The
//! sequence is strict: wait for the init property, build the hint backend,
//! initialize the interaction handler, publish. If the property never
//! appears or the backend cannot be built, the dispatcher stays not-ready
//! for the life of the process and keeps dropping hints.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::backend::{HintBackend, InteractionBoost, InteractionHandler, SysfsHintBackend};
use crate::config::{INIT_PROPERTY, INIT_READY_VALUE};
use crate::dispatch::HintDispatcher;
use crate::properties::{self, PropertyStore};

/// Spawn the detached bring-up task for `dispatcher`
pub fn spawn_bringup(
    dispatcher: HintDispatcher,
    store: Arc<dyn PropertyStore>,
    hint_config_path: PathBuf,
) {
    tokio::spawn(async move {
        properties::wait_for_property(&*store, INIT_PROPERTY, INIT_READY_VALUE).await;
        info!("init property observed, building hint backend");

        let backend: Arc<dyn HintBackend> =
            match SysfsHintBackend::from_config_path(&hint_config_path) {
                Ok(backend) => Arc::new(backend),
                Err(e) => {
                    error!(
                        path = ?hint_config_path,
                        error = %e,
                        "hint backend build failed, hints stay disabled"
                    );
                    return;
                }
            };

        let interaction = Arc::new(InteractionBoost::new(Arc::clone(&backend)));
        interaction.initialize();

        dispatcher.publish(backend, interaction);
    });
}
