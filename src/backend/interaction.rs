//! Touch/interaction boost handling
//!
//! A single worker task owns the boost lifetime: the first trigger begins
//! the `INTERACTION` hint, further triggers only extend the release
//! deadline, and expiry ends the hint. Triggering never blocks the caller.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::HintBackend;

const INTERACTION_HINT: &str = "INTERACTION";

/// Fallback boost length for non-positive duration payloads
const DEFAULT_BOOST: Duration = Duration::from_millis(1500);

/// Longest boost a single trigger can request
const MAX_BOOST: Duration = Duration::from_millis(5000);

/// Receives interaction events and manages the resulting boost
pub trait InteractionHandler: Send + Sync {
    /// Start any background machinery; called once during bring-up
    fn initialize(&self);

    /// Request a boost for roughly `duration_ms` milliseconds
    fn trigger_boost(&self, duration_ms: i32);
}

/// Interaction handler driving a [`HintBackend`]
pub struct InteractionBoost {
    backend: Arc<dyn HintBackend>,
    boost_tx: mpsc::Sender<Duration>,
    boost_rx: Mutex<Option<mpsc::Receiver<Duration>>>,
}

impl InteractionBoost {
    pub fn new(backend: Arc<dyn HintBackend>) -> Self {
        let (boost_tx, boost_rx) = mpsc::channel(32);
        Self {
            backend,
            boost_tx,
            boost_rx: Mutex::new(Some(boost_rx)),
        }
    }
}

impl InteractionHandler for InteractionBoost {
    fn initialize(&self) {
        let Ok(mut slot) = self.boost_rx.lock() else {
            warn!("interaction handler state poisoned");
            return;
        };
        let Some(boost_rx) = slot.take() else {
            warn!("interaction handler already initialized");
            return;
        };

        let backend = Arc::clone(&self.backend);
        tokio::spawn(run_worker(backend, boost_rx));
        info!("interaction handler initialized");
    }

    fn trigger_boost(&self, duration_ms: i32) {
        if self.boost_tx.try_send(boost_duration(duration_ms)).is_err() {
            debug!(duration_ms, "boost queue full, trigger dropped");
        }
    }
}

/// Clamp a raw duration payload into a usable boost length
fn boost_duration(duration_ms: i32) -> Duration {
    if duration_ms <= 0 {
        DEFAULT_BOOST
    } else {
        Duration::from_millis(duration_ms as u64).min(MAX_BOOST)
    }
}

async fn run_worker(backend: Arc<dyn HintBackend>, mut boost_rx: mpsc::Receiver<Duration>) {
    // None: no boost active. Some: release deadline for the active boost.
    let mut deadline: Option<Instant> = None;

    loop {
        match deadline {
            None => match boost_rx.recv().await {
                Some(duration) => {
                    debug!(?duration, "interaction boost begin");
                    backend.begin_hint(INTERACTION_HINT);
                    deadline = Some(Instant::now() + duration);
                }
                None => break,
            },
            Some(at) => tokio::select! {
                msg = boost_rx.recv() => match msg {
                    Some(duration) => {
                        let extended = Instant::now() + duration;
                        if extended > at {
                            deadline = Some(extended);
                        }
                    }
                    None => break,
                },
                _ = tokio::time::sleep_until(at) => {
                    debug!("interaction boost end");
                    backend.end_hint(INTERACTION_HINT);
                    deadline = None;
                }
            },
        }
    }

    // Channel closed mid-boost: release rather than leave the hint stuck on
    if deadline.is_some() {
        backend.end_hint(INTERACTION_HINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingBackend {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl HintBackend for RecordingBackend {
        fn begin_hint(&self, name: &str) {
            self.calls.lock().unwrap().push(format!("begin:{name}"));
        }

        fn end_hint(&self, name: &str) {
            self.calls.lock().unwrap().push(format!("end:{name}"));
        }
    }

    #[test]
    fn test_duration_clamping() {
        assert_eq!(boost_duration(0), DEFAULT_BOOST);
        assert_eq!(boost_duration(-5), DEFAULT_BOOST);
        assert_eq!(boost_duration(200), Duration::from_millis(200));
        assert_eq!(boost_duration(60_000), MAX_BOOST);
    }

    #[tokio::test(start_paused = true)]
    async fn test_boost_begins_then_ends() {
        let backend = Arc::new(RecordingBackend::default());
        let boost = InteractionBoost::new(backend.clone());
        boost.initialize();

        boost.trigger_boost(200);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(backend.calls(), vec!["begin:INTERACTION"]);

        tokio::time::sleep(MAX_BOOST).await;
        assert_eq!(backend.calls(), vec!["begin:INTERACTION", "end:INTERACTION"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_boosts_coalesce() {
        let backend = Arc::new(RecordingBackend::default());
        let boost = InteractionBoost::new(backend.clone());
        boost.initialize();

        boost.trigger_boost(200);
        tokio::time::sleep(Duration::from_millis(50)).await;
        boost.trigger_boost(200);
        tokio::time::sleep(MAX_BOOST).await;

        // One begin/end pair despite two triggers
        assert_eq!(backend.calls(), vec!["begin:INTERACTION", "end:INTERACTION"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_initialize_is_harmless() {
        let backend = Arc::new(RecordingBackend::default());
        let boost = InteractionBoost::new(backend.clone());
        boost.initialize();
        boost.initialize();

        boost.trigger_boost(100);
        tokio::time::sleep(MAX_BOOST).await;
        assert_eq!(backend.calls(), vec!["begin:INTERACTION", "end:INTERACTION"]);
    }
}
