//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (serializer limits > 0)
//! - Check level names against the known levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BoundlogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::BoundlogConfig;
use crate::logging::LogLevel;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("logging.serialize.{field} must be greater than zero")]
    ZeroLimit { field: &'static str },

    #[error("logging.level {0:?} is not one of debug, info, warn, error, silent")]
    UnknownLevel(String),

    #[error("logging.app_name must not be empty")]
    EmptyAppName,

    #[error("consent.state_path must not be empty")]
    EmptyStatePath,
}

/// Check a parsed config, collecting every problem found.
pub fn validate_config(config: &BoundlogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let logging = &config.logging;

    let limits = [
        ("depth", logging.serialize.depth),
        ("max_keys", logging.serialize.max_keys),
        ("max_array_length", logging.serialize.max_array_length),
        ("max_string_length", logging.serialize.max_string_length),
    ];
    for (field, value) in limits {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit { field });
        }
    }

    if let Some(level) = &logging.level {
        if level.parse::<LogLevel>().is_err() {
            errors.push(ValidationError::UnknownLevel(level.clone()));
        }
    }

    if logging.app_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        errors.push(ValidationError::EmptyAppName);
    }

    if config.consent.state_path.trim().is_empty() {
        errors.push(ValidationError::EmptyStatePath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&BoundlogConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = BoundlogConfig::default();
        config.logging.serialize.depth = 0;
        config.logging.serialize.max_string_length = 0;
        config.logging.level = Some("loud".to_string());
        config.logging.app_name = Some("  ".to_string());
        config.consent.state_path = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroLimit { field: "depth" },
                ValidationError::ZeroLimit { field: "max_string_length" },
                ValidationError::UnknownLevel("loud".to_string()),
                ValidationError::EmptyAppName,
                ValidationError::EmptyStatePath,
            ]
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::ZeroLimit { field: "max_keys" }.to_string(),
            "logging.serialize.max_keys must be greater than zero"
        );
    }
}
