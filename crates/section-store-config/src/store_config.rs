//! Store configuration
//!
//! Configuration loaded from .section-store.toml.

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What the store does when a section name is registered a second time
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DuplicatePolicy {
    /// The new registration replaces value, handler and routing entries
    #[default]
    Replace,
    /// The registration fails and the existing section is left untouched
    Reject,
}

/// Store configuration loaded from .section-store.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Name of the radio channel the store answers on
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Behaviour on re-registration of an existing section name
    #[serde(default)]
    pub duplicate_sections: DuplicatePolicy,

    /// Log level used when RUST_LOG is not set ("error" .. "trace")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_channel() -> String {
    crate::DEFAULT_CHANNEL.to_string()
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            duplicate_sections: DuplicatePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl StoreConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded store config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default store config");
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid store config")
    }

    /// Configured log level, falling back to `Debug` for unknown names
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.channel, "store");
        assert_eq!(config.duplicate_sections, DuplicatePolicy::Replace);
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            channel = "state"
            duplicate_sections = "reject"
            log_level = "warn"
        "#;
        let config = StoreConfig::from_toml(toml).unwrap();
        assert_eq!(config.channel, "state");
        assert_eq!(config.duplicate_sections, DuplicatePolicy::Reject);
        assert_eq!(config.log_level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            duplicate_sections = "reject"
        "#;
        let config = StoreConfig::from_toml(toml).unwrap();
        assert_eq!(config.duplicate_sections, DuplicatePolicy::Reject);
        // Other fields should use defaults
        assert_eq!(config.channel, "store");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        let toml = r#"
            duplicate_sections = "append"
        "#;
        assert!(StoreConfig::from_toml(toml).is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_debug() {
        let config = StoreConfig {
            log_level: "chatty".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_duplicate_policy_strings() {
        assert_eq!(DuplicatePolicy::Replace.to_string(), "replace");
        assert_eq!(
            DuplicatePolicy::from_str("Reject").unwrap(),
            DuplicatePolicy::Reject
        );
        assert!(DuplicatePolicy::from_str("append").is_err());
    }
}
