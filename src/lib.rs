//! Bounded, cycle-safe diagnostic logging library

pub mod config;
pub mod consent;
pub mod encoding;
pub mod logging;
pub mod serialize;

pub use config::schema::BoundlogConfig;
pub use logging::{LogLevel, Logger};
pub use serialize::{safe_stringify, serialize, LogValue, SerializeOptions, Value};
