//! Platform feature toggles
//!
//! Feature changes bypass the readiness gate: they are plain node writes
//! with no dependency on the hint backend.

use std::path::PathBuf;

use tracing::{debug, warn};

/// Discrete platform features a caller can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Feature {
    /// Wake the device on a double tap while the screen is off
    DoubleTapToWake = 1,
}

impl Feature {
    /// Map a raw wire value to a feature, `None` if unrecognized
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(Self::DoubleTapToWake),
            _ => None,
        }
    }
}

/// Applies feature toggles to the platform
pub trait FeatureController: Send + Sync {
    fn set_feature(&self, feature: Feature, enabled: bool);
}

/// Feature controller writing 1/0 to per-feature tunable nodes
pub struct SysfsFeatureController {
    double_tap_node: Option<PathBuf>,
}

impl SysfsFeatureController {
    pub fn new(double_tap_node: Option<PathBuf>) -> Self {
        Self { double_tap_node }
    }
}

impl FeatureController for SysfsFeatureController {
    fn set_feature(&self, feature: Feature, enabled: bool) {
        let node = match feature {
            Feature::DoubleTapToWake => self.double_tap_node.as_ref(),
        };

        let Some(node) = node else {
            debug!(?feature, "feature has no configured node");
            return;
        };

        let value = if enabled { "1" } else { "0" };
        if let Err(e) = std::fs::write(node, value) {
            warn!(?feature, ?node, error = %e, "feature write failed");
        }
    }
}
