//! Log levels and the enable/disable comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logging::error::LoggingError;

/// Severity of a log call, or the configured threshold of a logger.
///
/// `Silent` is only meaningful as a threshold: it disables every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Silent,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            LogLevel::Debug => 10,
            LogLevel::Info => 20,
            LogLevel::Warn => 30,
            LogLevel::Error => 40,
            LogLevel::Silent => 100,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    /// Matching `tracing` level; `None` for `Silent`.
    pub const fn tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| LoggingError::UnknownLevel(s.to_owned()))
    }
}

/// Rank of a level given by name. Unrecognized names rank as `info`.
pub fn rank_of_name(name: &str) -> u8 {
    name.parse::<LogLevel>().map_or(LogLevel::Info.rank(), LogLevel::rank)
}

/// Whether a call at `call` passes a logger configured at `configured`.
pub const fn is_enabled(call: LogLevel, configured: LogLevel) -> bool {
    !matches!(configured, LogLevel::Silent) && call.rank() >= configured.rank()
}

/// Threshold check bound to one configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    configured: LogLevel,
}

impl LevelFilter {
    pub const fn new(configured: LogLevel) -> Self {
        Self { configured }
    }

    pub const fn configured(&self) -> LogLevel {
        self.configured
    }

    pub const fn enabled(&self, call: LogLevel) -> bool {
        is_enabled(call, self.configured)
    }
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        level
            .tracing_level()
            .map_or(tracing_subscriber::filter::LevelFilter::OFF, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALLS: [LogLevel; 4] = [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    #[test]
    fn test_ranks() {
        let ranks: Vec<u8> = LogLevel::ALL.iter().map(|level| level.rank()).collect();
        assert_eq!(ranks, vec![10, 20, 30, 40, 100]);
    }

    #[test]
    fn test_rank_of_unknown_name_is_info() {
        assert_eq!(rank_of_name("warn"), 30);
        assert_eq!(rank_of_name("verbose"), 20);
        assert_eq!(rank_of_name(""), 20);
    }

    #[test]
    fn test_parse() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" silent ".parse::<LogLevel>(), Ok(LogLevel::Silent));
        assert_eq!(
            "trace".parse::<LogLevel>(),
            Err(LoggingError::UnknownLevel("trace".to_owned()))
        );
    }

    #[test]
    fn test_warn_threshold() {
        let filter = LevelFilter::new(LogLevel::Warn);
        let enabled: Vec<bool> = CALLS.iter().map(|call| filter.enabled(*call)).collect();
        assert_eq!(enabled, vec![false, false, true, true]);
    }

    #[test]
    fn test_silent_disables_everything() {
        let filter = LevelFilter::new(LogLevel::Silent);
        assert!(CALLS.iter().all(|call| !filter.enabled(*call)));
        assert!(!filter.enabled(LogLevel::Silent));
    }

    #[test]
    fn test_debug_threshold_enables_everything() {
        assert!(CALLS.iter().all(|call| is_enabled(*call, LogLevel::Debug)));
    }

    #[test]
    fn test_tracing_filter_conversion() {
        use tracing_subscriber::filter::LevelFilter as TracingFilter;
        assert_eq!(TracingFilter::from(LogLevel::Warn), TracingFilter::WARN);
        assert_eq!(TracingFilter::from(LogLevel::Silent), TracingFilter::OFF);
    }
}
