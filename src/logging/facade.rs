//! Per-subsystem logger handle.
//!
//! A `Logger` fixes its prefix, level and serialize limits at construction.
//! Disabled calls return before the data argument is looked at.

use std::fmt;
use std::sync::Arc;

use crate::config::schema::LoggingConfig;
use crate::logging::channel::{LogLine, OutputChannel, TracingChannel};
use crate::logging::environment::LogEnvironment;
use crate::logging::level::{LevelFilter, LogLevel};
use crate::serialize::{serialize, SerializeOptions, Value};

#[derive(Clone)]
pub struct Logger {
    prefix: String,
    filter: LevelFilter,
    serialize: SerializeOptions,
    channel: Arc<dyn OutputChannel>,
}

impl Logger {
    /// Logger for `name` with the process environment and the tracing channel.
    pub fn new(name: &str) -> Self {
        Self::builder(name).build()
    }

    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn level(&self) -> LogLevel {
        self.filter.configured()
    }

    pub fn serialize_options(&self) -> &SerializeOptions {
        &self.serialize
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.filter.enabled(level)
    }

    pub fn debug(&self, message: &str, data: Option<&Value>, rest: &[Value]) {
        self.write(LogLevel::Debug, message, data, rest);
    }

    pub fn info(&self, message: &str, data: Option<&Value>, rest: &[Value]) {
        self.write(LogLevel::Info, message, data, rest);
    }

    pub fn warn(&self, message: &str, data: Option<&Value>, rest: &[Value]) {
        self.write(LogLevel::Warn, message, data, rest);
    }

    pub fn error(&self, message: &str, data: Option<&Value>, rest: &[Value]) {
        self.write(LogLevel::Error, message, data, rest);
    }

    fn write(&self, level: LogLevel, message: &str, data: Option<&Value>, rest: &[Value]) {
        if !self.filter.enabled(level) {
            return;
        }

        // `Undefined` data means the argument was omitted.
        let data = data
            .filter(|value| !matches!(value, Value::Undefined))
            .map(|value| serialize(value, &self.serialize));
        let line = LogLine {
            prefix: &self.prefix,
            message,
            data: data.as_ref(),
            rest,
        };

        match level {
            LogLevel::Debug => self.channel.debug(&line),
            LogLevel::Info => self.channel.info(&line),
            LogLevel::Warn => self.channel.warn(&line),
            LogLevel::Error => self.channel.error(&line),
            LogLevel::Silent => {}
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("level", &self.filter.configured())
            .field("serialize", &self.serialize)
            .finish_non_exhaustive()
    }
}

/// Construction inputs for a [`Logger`]. Everything except the name is optional.
pub struct LoggerBuilder {
    name: String,
    level: Option<LogLevel>,
    serialize: Option<SerializeOptions>,
    channel: Option<Arc<dyn OutputChannel>>,
    environment: Option<LogEnvironment>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            serialize: None,
            channel: None,
            environment: None,
        }
    }

    /// Explicit level; skips environment resolution.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn serialize_options(mut self, options: SerializeOptions) -> Self {
        self.serialize = Some(options);
        self
    }

    pub fn channel<C: OutputChannel + 'static>(mut self, channel: C) -> Self {
        self.channel = Some(Arc::new(channel));
        self
    }

    pub fn shared_channel(mut self, channel: Arc<dyn OutputChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Environment consulted for the app tag and, without an explicit
    /// level, the default level. Defaults to [`LogEnvironment::from_process`].
    pub fn environment(mut self, environment: LogEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Apply a validated `[logging]` config section. An unparsable level
    /// name is left to environment resolution.
    pub fn config(mut self, config: &LoggingConfig) -> Self {
        if let Some(level) = config.level() {
            self.level = Some(level);
        }
        if let Some(app_name) = &config.app_name {
            let environment = self.environment.take().unwrap_or_default();
            self.environment = Some(environment.with_app_name(app_name.clone()));
        }
        self.serialize = Some(config.serialize);
        self
    }

    pub fn build(self) -> Logger {
        let environment = self.environment.unwrap_or_default();
        let level = self.level.unwrap_or_else(|| environment.default_level());
        Logger {
            prefix: format!("[{}][{}]", environment.app_name, self.name),
            filter: LevelFilter::new(level),
            serialize: self.serialize.unwrap_or_default(),
            channel: self.channel.unwrap_or_else(|| Arc::new(TracingChannel)),
        }
    }
}
