//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::serialize::SerializeOptions;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct BoundlogConfig {
    /// Logger defaults.
    pub logging: LoggingConfig,

    /// Disclaimer consent persistence.
    pub consent: ConsentConfig,
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level name for loggers built from this config. Unset means the
    /// process override or build-mode default applies.
    pub level: Option<String>,

    /// Tag shown first in every prefix.
    pub app_name: Option<String>,

    /// Serializer limits; missing fields keep their defaults.
    pub serialize: SerializeOptions,
}

impl LoggingConfig {
    /// Parsed level, `None` when unset or not a level name.
    pub fn level(&self) -> Option<LogLevel> {
        self.level.as_deref().and_then(|name| name.parse().ok())
    }
}

/// Consent state configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConsentConfig {
    /// JSON file holding the persisted disclaimer state.
    pub state_path: String,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            state_path: "disclaimer-state.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: BoundlogConfig = toml::from_str("").unwrap();
        assert_eq!(config, BoundlogConfig::default());
        assert_eq!(config.logging.serialize, SerializeOptions::default());
        assert_eq!(config.consent.state_path, "disclaimer-state.json");
    }

    #[test]
    fn test_partial_sections() {
        let config: BoundlogConfig = toml::from_str(
            r#"
            [logging]
            level = "warn"

            [logging.serialize]
            max_string_length = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level(), Some(LogLevel::Warn));
        assert_eq!(config.logging.serialize.max_string_length, 200);
        assert_eq!(config.logging.serialize.depth, 8);
    }
}
