//! Default-level resolution for loggers built without an explicit level.
//!
//! # Lifecycle
//! ```text
//! process start
//!     → set_level_override("debug")      (optional, at most once)
//!     → LogEnvironment::from_process()   (reads override + build mode)
//!     → Logger construction              (level fixed from here on)
//! ```

use std::sync::OnceLock;

use crate::logging::error::LoggingError;
use crate::logging::level::LogLevel;

/// App tag used in logger prefixes when none is configured.
pub const DEFAULT_APP_NAME: &str = env!("CARGO_PKG_NAME");

static LEVEL_OVERRIDE: OnceLock<String> = OnceLock::new();

/// Write the process-wide level override. Only the first write wins.
///
/// Must happen before loggers are constructed; loggers read it once.
pub fn set_level_override(level: impl Into<String>) -> Result<(), LoggingError> {
    LEVEL_OVERRIDE.set(level.into()).map_err(|rejected| LoggingError::OverrideAlreadySet {
        current: LEVEL_OVERRIDE.get().cloned().unwrap_or_default(),
        rejected,
    })
}

/// The raw process-wide override, if one was written.
pub fn level_override() -> Option<&'static str> {
    LEVEL_OVERRIDE.get().map(String::as_str)
}

/// Inputs consulted when a logger has no explicit level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEnvironment {
    pub app_name: String,
    /// Raw override value; ignored unless it names a level.
    pub level_override: Option<String>,
    /// Development build: defaults to `debug` instead of `info`.
    pub dev_build: bool,
}

impl LogEnvironment {
    /// Snapshot of the process-wide override and the build mode.
    pub fn from_process() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_owned(),
            level_override: level_override().map(str::to_owned),
            dev_build: cfg!(debug_assertions),
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_level_override(mut self, level: impl Into<String>) -> Self {
        self.level_override = Some(level.into());
        self
    }

    pub fn with_dev_build(mut self, dev_build: bool) -> Self {
        self.dev_build = dev_build;
        self
    }

    /// Valid override, else the build-mode default.
    pub fn default_level(&self) -> LogLevel {
        if let Some(raw) = self.level_override.as_deref() {
            match raw.parse() {
                Ok(level) => return level,
                Err(e) => tracing::warn!(error = %e, "Ignoring level override"),
            }
        }
        if self.dev_build {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

impl Default for LogEnvironment {
    fn default() -> Self {
        Self::from_process()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release() -> LogEnvironment {
        LogEnvironment {
            app_name: "app".to_owned(),
            level_override: None,
            dev_build: false,
        }
    }

    #[test]
    fn test_build_mode_defaults() {
        assert_eq!(release().default_level(), LogLevel::Info);
        assert_eq!(release().with_dev_build(true).default_level(), LogLevel::Debug);
    }

    #[test]
    fn test_valid_override_wins() {
        let env = release().with_dev_build(true).with_level_override("error");
        assert_eq!(env.default_level(), LogLevel::Error);
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let env = release().with_level_override("chatty");
        assert_eq!(env.default_level(), LogLevel::Info);
    }

    #[test]
    fn test_override_slot_is_write_once() {
        // The only test in this binary that touches the global slot.
        assert!(set_level_override("warn").is_ok());
        assert_eq!(level_override(), Some("warn"));
        assert_eq!(
            set_level_override("debug"),
            Err(LoggingError::OverrideAlreadySet {
                current: "warn".to_owned(),
                rejected: "debug".to_owned(),
            })
        );
        assert_eq!(LogEnvironment::from_process().level_override.as_deref(), Some("warn"));
    }
}
