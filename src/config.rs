//! Configuration loading and management

use std::path::PathBuf;

/// Property that the vendor init layer sets once the backend config is usable
pub const INIT_PROPERTY: &str = "perfhintd.init";

/// Value of [`INIT_PROPERTY`] that signals readiness
pub const INIT_READY_VALUE: &str = "1";

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Key=value properties file holding the init property
    pub property_file: PathBuf,

    /// Path to the hint configuration consumed by the backend
    pub hint_config_path: PathBuf,

    /// Tunable node for the double-tap-to-wake feature, if the platform has one
    pub double_tap_node: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment overrides and defaults
    pub fn load() -> Self {
        let property_file = std::env::var_os("PERFHINTD_PROPERTY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/run/perfhintd/properties"));

        let hint_config_path = std::env::var_os("PERFHINTD_HINT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/etc/perfhintd/powerhint.json"));

        let double_tap_node = std::env::var_os("PERFHINTD_DTW_NODE").map(PathBuf::from);

        Self {
            property_file,
            hint_config_path,
            double_tap_node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::load();
        assert!(config
            .hint_config_path
            .to_string_lossy()
            .contains("powerhint"));
    }

    #[test]
    fn test_config_env_override() {
        std::env::set_var("PERFHINTD_DTW_NODE", "/tmp/dt2w");
        let config = Config::load();
        assert_eq!(config.double_tap_node, Some(PathBuf::from("/tmp/dt2w")));
        std::env::remove_var("PERFHINTD_DTW_NODE");
    }
}
