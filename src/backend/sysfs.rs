//! Hint backend writing tunable file nodes
//!
//! Configuration is a JSON document declaring the writable nodes and the
//! per-hint actions over them:
//!
//! ```json
//! {
//!   "nodes": [{"name": "cpu_boost", "path": "/sys/.../boost", "default": "0"}],
//!   "actions": [{"hint": "LAUNCH", "node": "cpu_boost", "value": "1"}]
//! }
//! ```
//!
//! Beginning a hint writes each matching action's value; ending it restores
//! each touched node's default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::HintBackend;

/// Errors raised while building a backend from its configuration
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to read hint config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hint config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("action for hint {hint} references unknown node {node}")]
    UnknownNode { hint: String, node: String },
}

/// A writable tunable node
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    pub path: PathBuf,
    /// Value restored when a hint ends
    pub default: String,
}

/// One node write performed while a hint is active
#[derive(Debug, Clone, Deserialize)]
pub struct ActionConfig {
    pub hint: String,
    pub node: String,
    pub value: String,
}

/// Top-level hint configuration document
#[derive(Debug, Clone, Deserialize)]
pub struct HintConfig {
    pub nodes: Vec<NodeConfig>,
    pub actions: Vec<ActionConfig>,
}

#[derive(Debug, Clone)]
struct ResolvedAction {
    path: PathBuf,
    value: String,
    default: String,
}

/// Hint backend applying node writes declared in a [`HintConfig`]
#[derive(Debug)]
pub struct SysfsHintBackend {
    actions: HashMap<String, Vec<ResolvedAction>>,
}

impl SysfsHintBackend {
    /// Build a backend from a JSON configuration file
    pub fn from_config_path(path: &Path) -> Result<Self, BackendError> {
        let contents = std::fs::read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: HintConfig = serde_json::from_str(&contents)?;
        Self::from_config(config)
    }

    /// Build a backend from an already-parsed configuration
    pub fn from_config(config: HintConfig) -> Result<Self, BackendError> {
        let nodes: HashMap<&str, &NodeConfig> = config
            .nodes
            .iter()
            .map(|node| (node.name.as_str(), node))
            .collect();

        let mut actions: HashMap<String, Vec<ResolvedAction>> = HashMap::new();
        for action in &config.actions {
            let Some(node) = nodes.get(action.node.as_str()) else {
                return Err(BackendError::UnknownNode {
                    hint: action.hint.clone(),
                    node: action.node.clone(),
                });
            };
            actions.entry(action.hint.clone()).or_default().push(ResolvedAction {
                path: node.path.clone(),
                value: action.value.clone(),
                default: node.default.clone(),
            });
        }

        info!(
            hints = actions.len(),
            nodes = config.nodes.len(),
            "hint backend configured"
        );

        Ok(Self { actions })
    }

    fn write_node(path: &Path, value: &str) {
        if let Err(e) = std::fs::write(path, value) {
            warn!(?path, value, error = %e, "node write failed");
        }
    }
}

impl HintBackend for SysfsHintBackend {
    fn begin_hint(&self, name: &str) {
        let Some(actions) = self.actions.get(name) else {
            debug!(hint = name, "no actions configured for hint");
            return;
        };

        debug!(hint = name, "hint begin");
        for action in actions {
            Self::write_node(&action.path, &action.value);
        }
    }

    fn end_hint(&self, name: &str) {
        let Some(actions) = self.actions.get(name) else {
            debug!(hint = name, "no actions configured for hint");
            return;
        };

        debug!(hint = name, "hint end");
        for action in actions {
            Self::write_node(&action.path, &action.default);
        }
    }
}
