//! Level-gated, per-subsystem logging.
//!
//! # Data Flow
//! ```text
//! logger.warn(msg, Some(&data), rest)
//!     → level.rs (rank(call) >= rank(configured), configured != silent)
//!     → disabled: return, data untouched
//!     → enabled: serialize(data, logger limits)
//!     → channel.rs (severity-matched write: tracing or recording)
//! ```
//!
//! # Design Decisions
//! - Level is resolved once at construction: explicit, else environment
//!   override, else build mode
//! - The process-wide override is write-once (`OnceLock`)
//! - No state beyond the per-call enabled/disabled branch

pub mod channel;
pub mod environment;
pub mod error;
pub mod facade;
pub mod level;

pub use channel::{LogLine, OutputChannel, RecordedLine, RecordingChannel, TracingChannel};
pub use environment::{level_override, set_level_override, LogEnvironment};
pub use error::LoggingError;
pub use facade::{Logger, LoggerBuilder};
pub use level::{is_enabled, rank_of_name, LevelFilter, LogLevel};
