//! Output channels: where enabled log lines are written.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::logging::level::LogLevel;
use crate::serialize::{LogValue, Value};

/// One enabled log call, after serialization of its data argument.
#[derive(Debug, Clone, Copy)]
pub struct LogLine<'a> {
    pub prefix: &'a str,
    pub message: &'a str,
    pub data: Option<&'a LogValue>,
    /// Trailing arguments, passed through untouched.
    pub rest: &'a [Value],
}

/// Severity-tagged sink. Writes are fire-and-forget.
pub trait OutputChannel: Send + Sync {
    fn debug(&self, line: &LogLine<'_>);
    fn info(&self, line: &LogLine<'_>);
    fn warn(&self, line: &LogLine<'_>);
    fn error(&self, line: &LogLine<'_>);
}

/// Forwards lines to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingChannel;

macro_rules! forward {
    ($macro:ident, $line:expr) => {{
        let line = $line;
        tracing::$macro!(
            prefix = line.prefix,
            data = line.data.map(tracing::field::display),
            rest = ?line.rest,
            "{}",
            line.message
        );
    }};
}

impl OutputChannel for TracingChannel {
    fn debug(&self, line: &LogLine<'_>) {
        forward!(debug, line);
    }

    fn info(&self, line: &LogLine<'_>) {
        forward!(info, line);
    }

    fn warn(&self, line: &LogLine<'_>) {
        forward!(warn, line);
    }

    fn error(&self, line: &LogLine<'_>) {
        forward!(error, line);
    }
}

/// A line captured by [`RecordingChannel`].
#[derive(Debug, Clone)]
pub struct RecordedLine {
    pub level: LogLevel,
    pub prefix: String,
    pub message: String,
    pub data: Option<LogValue>,
    pub rest: Vec<Value>,
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    lines: Arc<Mutex<Vec<RecordedLine>>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<RecordedLine> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn record(&self, level: LogLevel, line: &LogLine<'_>) {
        self.lines.lock().push(RecordedLine {
            level,
            prefix: line.prefix.to_owned(),
            message: line.message.to_owned(),
            data: line.data.cloned(),
            rest: line.rest.to_vec(),
        });
    }
}

impl OutputChannel for RecordingChannel {
    fn debug(&self, line: &LogLine<'_>) {
        self.record(LogLevel::Debug, line);
    }

    fn info(&self, line: &LogLine<'_>) {
        self.record(LogLevel::Info, line);
    }

    fn warn(&self, line: &LogLine<'_>) {
        self.record(LogLevel::Warn, line);
    }

    fn error(&self, line: &LogLine<'_>) {
        self.record(LogLevel::Error, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_channel_shares_buffer() {
        let channel = RecordingChannel::new();
        let clone = channel.clone();
        let data = json!({ "k": 1 });
        let rest = [Value::from("extra")];
        clone.warn(&LogLine {
            prefix: "[app][db]",
            message: "slow query",
            data: Some(&data),
            rest: &rest,
        });

        let lines = channel.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, LogLevel::Warn);
        assert_eq!(lines[0].message, "slow query");
        assert_eq!(lines[0].data, Some(data));
        assert_eq!(lines[0].rest.len(), 1);

        channel.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn test_tracing_channel_without_subscriber() {
        let line = LogLine {
            prefix: "[app][net]",
            message: "dropped",
            data: None,
            rest: &[],
        };
        TracingChannel.debug(&line);
        TracingChannel.error(&line);
    }
}
