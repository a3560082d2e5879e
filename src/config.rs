//! Bridge configuration
//!
//! Stored in `~/.config/editbridge/config.yaml`:
//!
//! ```yaml
//! default_profile: xhtml
//! modes:
//!   text/x-scss: scss
//! single_selection_actions:
//!   - toggle_comment
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// User preferences layered over the built-in tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Profile used when the host has no override
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Extra host mode -> engine syntax entries
    #[serde(default)]
    pub modes: BTreeMap<String, String>,

    /// Actions to run once instead of once per selection
    #[serde(default)]
    pub single_selection_actions: Vec<String>,
}

impl BridgeConfig {
    /// Load config from the config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "default_profile: xhtml\nmodes:\n  text/x-scss: scss\nsingle_selection_actions:\n  - toggle_comment\n",
        )
        .unwrap();

        let config = BridgeConfig::load_from(&path);
        assert_eq!(config.default_profile.as_deref(), Some("xhtml"));
        assert_eq!(config.modes.get("text/x-scss").map(String::as_str), Some("scss"));
        assert_eq!(config.single_selection_actions, vec!["toggle_comment"]);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_profile: html\n").unwrap();

        let config = BridgeConfig::load_from(&path);
        assert_eq!(config.default_profile.as_deref(), Some("html"));
        assert!(config.modes.is_empty());
    }

    #[test]
    fn test_missing_and_malformed_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            BridgeConfig::load_from(&dir.path().join("nope.yaml")),
            BridgeConfig::default()
        );

        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "modes: [not, a, map").unwrap();
        assert_eq!(BridgeConfig::load_from(&path), BridgeConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip_of_defaults() {
        let yaml = BridgeConfig::default().to_yaml().unwrap();
        let parsed: BridgeConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, BridgeConfig::default());
    }
}
