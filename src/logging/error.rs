//! Logging subsystem errors.

use thiserror::Error;

/// Errors raised while configuring loggers. Log calls themselves never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    /// Name does not match any level.
    #[error("unknown log level: {0:?}")]
    UnknownLevel(String),

    /// The process-wide override was already written.
    #[error("level override already set to {current:?}, rejected {rejected:?}")]
    OverrideAlreadySet { current: String, rejected: String },
}
