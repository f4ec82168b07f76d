//! Process-wide named properties
//!
//! The vendor init layer publishes properties as key=value lines in a flat
//! file. The store re-reads the file on every lookup, so a waiter polling it
//! observes writes made after the daemon started.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

/// Interval between polls while waiting on a property
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Read access to named process-wide properties
pub trait PropertyStore: Send + Sync {
    /// Current value of `name`, or `None` if unset
    fn get(&self, name: &str) -> Option<String>;
}

/// Property store backed by a key=value file
pub struct FilePropertyStore {
    path: PathBuf,
}

impl FilePropertyStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> HashMap<String, String> {
        let mut properties = HashMap::new();

        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return properties;
        };

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                properties.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        properties
    }
}

impl PropertyStore for FilePropertyStore {
    fn get(&self, name: &str) -> Option<String> {
        self.read_all().remove(name)
    }
}

/// Wait until `name` holds `value`
///
/// Polls every [`POLL_INTERVAL`] with no timeout: if the property never
/// reaches the value, this future never resolves.
pub async fn wait_for_property(store: &dyn PropertyStore, name: &str, value: &str) {
    loop {
        if store.get(name).as_deref() == Some(value) {
            debug!(property = name, value, "property reached expected value");
            return;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
