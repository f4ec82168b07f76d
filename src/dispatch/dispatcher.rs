//! Core dispatch state machine
//!
//! Three pieces of shared state drive every decision: the one-way readiness
//! flag, the sustained-performance mode flag, and the once-published backend
//! handles. Readiness is published with Release ordering after the handles
//! are set, so any caller that observes ready may use them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::backend::{HintBackend, InteractionHandler};
use crate::config::Config;
use crate::features::{Feature, FeatureController, SysfsFeatureController};
use crate::hints::{ExtHintId, HintId};
use crate::lifecycle;
use crate::properties::FilePropertyStore;
use crate::stats::{PlatformSleepState, Status, SubsystemStats};

/// Backend handles created during bring-up, published exactly once
struct Service {
    backend: Arc<dyn HintBackend>,
    interaction: Arc<dyn InteractionHandler>,
}

struct Shared {
    ready: AtomicBool,
    sustained_perf: AtomicBool,
    service: OnceLock<Service>,
    features: Arc<dyn FeatureController>,
}

/// Hint dispatch facade
///
/// Cheap to clone; all clones share the same state. Safe to call from any
/// number of threads concurrently.
#[derive(Clone)]
pub struct HintDispatcher {
    shared: Arc<Shared>,
}

impl HintDispatcher {
    /// Create a dispatcher that drops all hints until [`publish`] is called
    ///
    /// [`publish`]: HintDispatcher::publish
    pub fn new(features: Arc<dyn FeatureController>) -> Self {
        Self {
            shared: Arc::new(Shared {
                ready: AtomicBool::new(false),
                sustained_perf: AtomicBool::new(false),
                service: OnceLock::new(),
                features,
            }),
        }
    }

    /// Create a dispatcher and spawn its detached bring-up task
    ///
    /// Must be called within a tokio runtime. The bring-up task is never
    /// joined; the dispatcher becomes ready once it completes.
    pub fn start(config: &Config) -> Self {
        let features = Arc::new(SysfsFeatureController::new(config.double_tap_node.clone()));
        let dispatcher = Self::new(features);

        let store = Arc::new(FilePropertyStore::new(config.property_file.clone()));
        lifecycle::spawn_bringup(dispatcher.clone(), store, config.hint_config_path.clone());

        dispatcher
    }

    /// Whether bring-up has completed
    ///
    /// Monotonic: once true, always true.
    pub fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::Acquire)
    }

    /// Whether sustained-performance mode is currently on
    pub fn sustained_performance_on(&self) -> bool {
        self.shared.sustained_perf.load(Ordering::Acquire)
    }

    /// Publish the backend handles and open the gate; called by bring-up
    pub fn publish(
        &self,
        backend: Arc<dyn HintBackend>,
        interaction: Arc<dyn InteractionHandler>,
    ) {
        if self
            .shared
            .service
            .set(Service {
                backend,
                interaction,
            })
            .is_err()
        {
            warn!("backend handles already published");
            return;
        }

        self.shared.ready.store(true, Ordering::Release);
        info!("ready to process hints");
    }

    /// Interactive-mode notification; accepted and ignored
    pub fn set_interactive(&self, _interactive: bool) {}

    /// Deliver a base-set hint
    pub fn dispatch_hint(&self, hint: HintId, data: i32) {
        if !self.is_ready() {
            return;
        }
        let Some(service) = self.shared.service.get() else {
            return;
        };
        self.dispatch_base(service, hint, data);
    }

    /// Asynchronous-delivery alias for [`dispatch_hint`]; identical effect
    ///
    /// [`dispatch_hint`]: HintDispatcher::dispatch_hint
    pub fn dispatch_hint_async(&self, hint: HintId, data: i32) {
        self.dispatch_hint(hint, data);
    }

    /// Deliver an extension-set hint
    ///
    /// Values the extension path does not special-case fall back to their
    /// base-set handling; extension-only values without one are ignored.
    pub fn dispatch_hint_ext(&self, hint: ExtHintId, data: i32) {
        if !self.is_ready() {
            return;
        }
        let Some(service) = self.shared.service.get() else {
            return;
        };

        match hint {
            ExtHintId::AudioLowLatency => {
                if data != 0 {
                    debug!("audio low latency on");
                    service.backend.begin_hint(hint.name());
                } else {
                    debug!("audio low latency off");
                    service.backend.end_hint(hint.name());
                }
            }
            ExtHintId::AudioStreaming => {
                if self.sustained_performance_on() {
                    return;
                }
                if data != 0 {
                    debug!("audio streaming on");
                    service.backend.begin_hint(hint.name());
                } else {
                    debug!("audio streaming off");
                    service.backend.end_hint(hint.name());
                }
            }
            other => {
                if let Some(base) = other.base_hint() {
                    self.dispatch_base(service, base, data);
                }
            }
        }
    }

    /// Toggle a platform feature; direct pass-through, not readiness-gated
    pub fn set_feature(&self, feature: Feature, enabled: bool) {
        self.shared.features.set_feature(feature, enabled);
    }

    /// Platform sleep-state residency; no data is gathered on this platform
    pub fn platform_low_power_stats(&self) -> (Vec<PlatformSleepState>, Status) {
        (Vec::new(), Status::Success)
    }

    /// Per-subsystem sleep-state residency; no data is gathered on this platform
    pub fn subsystem_low_power_stats(&self) -> (Vec<SubsystemStats>, Status) {
        (Vec::new(), Status::Success)
    }

    fn dispatch_base(&self, service: &Service, hint: HintId, data: i32) {
        match hint {
            HintId::Interaction => {
                if self.sustained_performance_on() {
                    return;
                }
                service.interaction.trigger_boost(data);
            }
            HintId::SustainedPerformance => {
                if data != 0 && self.sustained_performance_on() {
                    return;
                }
                if data != 0 {
                    debug!("sustained performance mode on");
                    service.backend.begin_hint(hint.name());
                    self.shared.sustained_perf.store(true, Ordering::Release);
                } else {
                    // End is issued even when the mode was already off
                    debug!("sustained performance mode off");
                    service.backend.end_hint(hint.name());
                    self.shared.sustained_perf.store(false, Ordering::Release);
                }
            }
            HintId::Launch => {
                if self.sustained_performance_on() {
                    return;
                }
                if data != 0 {
                    debug!("launch boost on");
                    service.backend.begin_hint(hint.name());
                } else {
                    debug!("launch boost off");
                    service.backend.end_hint(hint.name());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

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

    #[derive(Default)]
    struct RecordingInteraction {
        boosts: Mutex<Vec<i32>>,
    }

    impl RecordingInteraction {
        fn boosts(&self) -> Vec<i32> {
            self.boosts.lock().unwrap().clone()
        }
    }

    impl InteractionHandler for RecordingInteraction {
        fn initialize(&self) {}

        fn trigger_boost(&self, duration_ms: i32) {
            self.boosts.lock().unwrap().push(duration_ms);
        }
    }

    #[derive(Default)]
    struct RecordingFeatures {
        toggles: Mutex<Vec<(Feature, bool)>>,
    }

    impl FeatureController for RecordingFeatures {
        fn set_feature(&self, feature: Feature, enabled: bool) {
            self.toggles.lock().unwrap().push((feature, enabled));
        }
    }

    fn ready_dispatcher() -> (HintDispatcher, Arc<RecordingBackend>, Arc<RecordingInteraction>) {
        let dispatcher = HintDispatcher::new(Arc::new(RecordingFeatures::default()));
        let backend = Arc::new(RecordingBackend::default());
        let interaction = Arc::new(RecordingInteraction::default());
        dispatcher.publish(backend.clone(), interaction.clone());
        (dispatcher, backend, interaction)
    }

    #[test]
    fn test_not_ready_drops_hints() {
        let dispatcher = HintDispatcher::new(Arc::new(RecordingFeatures::default()));
        assert!(!dispatcher.is_ready());

        dispatcher.dispatch_hint(HintId::Interaction, 5);
        dispatcher.dispatch_hint(HintId::SustainedPerformance, 1);
        dispatcher.dispatch_hint_ext(ExtHintId::AudioLowLatency, 1);

        assert!(!dispatcher.is_ready());
        assert!(!dispatcher.sustained_performance_on());
    }

    #[test]
    fn test_publish_opens_gate_once() {
        let (dispatcher, _backend, _interaction) = ready_dispatcher();
        assert!(dispatcher.is_ready());

        // A second publish is rejected and changes nothing
        let late_backend = Arc::new(RecordingBackend::default());
        dispatcher.publish(late_backend.clone(), Arc::new(RecordingInteraction::default()));

        dispatcher.dispatch_hint(HintId::Launch, 1);
        assert!(late_backend.calls().is_empty());
    }

    #[test]
    fn test_sustained_performance_on_is_idempotent() {
        let (dispatcher, backend, _interaction) = ready_dispatcher();

        dispatcher.dispatch_hint(HintId::SustainedPerformance, 1);
        assert!(dispatcher.sustained_performance_on());

        dispatcher.dispatch_hint(HintId::SustainedPerformance, 1);
        dispatcher.dispatch_hint(HintId::SustainedPerformance, 2);

        assert_eq!(backend.calls(), vec!["begin:SUSTAINED_PERFORMANCE"]);
    }

    #[test]
    fn test_sustained_performance_off_always_ends() {
        let (dispatcher, backend, _interaction) = ready_dispatcher();

        // End is issued even though the mode was never on
        dispatcher.dispatch_hint(HintId::SustainedPerformance, 0);
        assert!(!dispatcher.sustained_performance_on());
        assert_eq!(backend.calls(), vec!["end:SUSTAINED_PERFORMANCE"]);
    }

    #[test]
    fn test_sustained_mode_suppresses_transients() {
        let (dispatcher, backend, interaction) = ready_dispatcher();

        dispatcher.dispatch_hint(HintId::SustainedPerformance, 1);

        dispatcher.dispatch_hint(HintId::Launch, 1);
        dispatcher.dispatch_hint(HintId::Interaction, 5);
        dispatcher.dispatch_hint_ext(ExtHintId::AudioStreaming, 1);

        assert_eq!(backend.calls(), vec!["begin:SUSTAINED_PERFORMANCE"]);
        assert!(interaction.boosts().is_empty());

        // Audio low latency is exempt from suppression
        dispatcher.dispatch_hint_ext(ExtHintId::AudioLowLatency, 1);
        assert_eq!(
            backend.calls(),
            vec!["begin:SUSTAINED_PERFORMANCE", "begin:AUDIO_LOW_LATENCY"]
        );
    }

    #[test]
    fn test_mode_off_restores_transient_dispatch() {
        let (dispatcher, backend, _interaction) = ready_dispatcher();

        dispatcher.dispatch_hint(HintId::SustainedPerformance, 1);
        dispatcher.dispatch_hint(HintId::Launch, 1);
        dispatcher.dispatch_hint(HintId::SustainedPerformance, 0);
        dispatcher.dispatch_hint(HintId::Launch, 1);

        assert_eq!(
            backend.calls(),
            vec![
                "begin:SUSTAINED_PERFORMANCE",
                "end:SUSTAINED_PERFORMANCE",
                "begin:LAUNCH"
            ]
        );
    }

    #[test]
    fn test_audio_low_latency_end_independent_of_mode() {
        let (dispatcher, backend, _interaction) = ready_dispatcher();

        dispatcher.dispatch_hint_ext(ExtHintId::AudioLowLatency, 0);
        assert_eq!(backend.calls(), vec!["end:AUDIO_LOW_LATENCY"]);
    }

    #[test]
    fn test_extension_fallback_matches_base_dispatch() {
        let (via_ext, ext_backend, _i1) = ready_dispatcher();
        let (via_base, base_backend, _i2) = ready_dispatcher();

        via_ext.dispatch_hint_ext(ExtHintId::Launch, 1);
        via_base.dispatch_hint(HintId::Launch, 1);
        assert_eq!(ext_backend.calls(), base_backend.calls());

        via_ext.dispatch_hint_ext(ExtHintId::SustainedPerformance, 1);
        via_base.dispatch_hint(HintId::SustainedPerformance, 1);
        assert_eq!(ext_backend.calls(), base_backend.calls());
        assert!(via_ext.sustained_performance_on());
    }

    #[test]
    fn test_async_alias_has_identical_effect() {
        let (dispatcher, backend, _interaction) = ready_dispatcher();

        dispatcher.dispatch_hint_async(HintId::Launch, 1);
        dispatcher.dispatch_hint_async(HintId::Launch, 0);

        assert_eq!(backend.calls(), vec!["begin:LAUNCH", "end:LAUNCH"]);
    }

    #[test]
    fn test_unrecognized_hints_are_ignored() {
        let (dispatcher, backend, interaction) = ready_dispatcher();

        dispatcher.dispatch_hint(HintId::Vsync, 1);
        dispatcher.dispatch_hint(HintId::LowPower, 1);
        dispatcher.dispatch_hint(HintId::VrMode, 1);
        dispatcher.dispatch_hint_ext(ExtHintId::CameraLaunch, 1);
        dispatcher.dispatch_hint_ext(ExtHintId::CameraShot, 1);

        assert!(backend.calls().is_empty());
        assert!(interaction.boosts().is_empty());
    }

    #[test]
    fn test_interaction_forwards_payload() {
        let (dispatcher, backend, interaction) = ready_dispatcher();

        dispatcher.dispatch_hint(HintId::Interaction, 5);
        dispatcher.dispatch_hint_ext(ExtHintId::Interaction, 250);

        assert_eq!(interaction.boosts(), vec![5, 250]);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_set_interactive_is_noop() {
        let (dispatcher, backend, interaction) = ready_dispatcher();

        dispatcher.set_interactive(true);
        dispatcher.set_interactive(false);

        assert!(backend.calls().is_empty());
        assert!(interaction.boosts().is_empty());
    }

    #[test]
    fn test_feature_toggle_bypasses_readiness() {
        let features = Arc::new(RecordingFeatures::default());
        let dispatcher = HintDispatcher::new(features.clone());
        assert!(!dispatcher.is_ready());

        dispatcher.set_feature(Feature::DoubleTapToWake, true);
        dispatcher.set_feature(Feature::DoubleTapToWake, false);

        assert_eq!(
            features.toggles.lock().unwrap().clone(),
            vec![(Feature::DoubleTapToWake, true), (Feature::DoubleTapToWake, false)]
        );
    }

    #[test]
    fn test_low_power_stats_are_empty() {
        let (dispatcher, _backend, _interaction) = ready_dispatcher();

        let (platform, status) = dispatcher.platform_low_power_stats();
        assert!(platform.is_empty());
        assert_eq!(status, Status::Success);

        let (subsystems, status) = dispatcher.subsystem_low_power_stats();
        assert!(subsystems.is_empty());
        assert_eq!(status, Status::Success);
    }
}
