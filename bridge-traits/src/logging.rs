//! Host Logging Abstraction
//!
//! Forwards structured log entries from the core to the host's native log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Android `android.util.Log` priority (VERBOSE = 2 .. ERROR = 6)
    pub fn android_priority(&self) -> i32 {
        match self {
            LogLevel::Trace => 2,
            LogLevel::Debug => 3,
            LogLevel::Info => 4,
            LogLevel::Warn => 5,
            LogLevel::Error => 6,
        }
    }

    /// Single-letter Logcat marker
    pub fn letter(&self) -> char {
        match self {
            LogLevel::Trace => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warn => 'W',
            LogLevel::Error => 'E',
        }
    }
}

/// Structured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Log tag (the emitting module path)
    pub tag: String,
    pub message: String,
    /// Structured fields recorded on the event
    pub fields: HashMap<String, String>,
    /// Name of the enclosing span, if any
    pub span: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            tag: tag.into(),
            message: message.into(),
            fields: HashMap::new(),
            span: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_span(mut self, span: impl Into<String>) -> Self {
        self.span = Some(span.into());
        self
    }

    /// Render the message followed by `key=value` pairs in key order
    pub fn formatted_message(&self) -> String {
        if self.fields.is_empty() {
            return self.message.clone();
        }

        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();

        let pairs: Vec<String> = keys
            .into_iter()
            .map(|key| format!("{}={}", key, self.fields[key]))
            .collect();

        format!("{} {}", self.message, pairs.join(" "))
    }
}

/// Logger sink trait
///
/// Forwards logs from the core to host logging pipelines:
/// - **Android**: Logcat (`__android_log_write`) under the module tag
/// - **Desktop / tests**: stdout via [`ConsoleLogger`]
///
/// # Example
///
/// ```ignore
/// use bridge_traits::logging::{LoggerSink, LogEntry, LogLevel};
///
/// async fn log_failure(logger: &dyn LoggerSink, error: &str) {
///     let entry = LogEntry::new(LogLevel::Error, "HeadphoneDetectV2", error)
///         .with_field("operation", "register_receiver");
///     logger.log(entry).await.ok();
/// }
/// ```
#[async_trait::async_trait]
pub trait LoggerSink: Send + Sync {
    /// Forward a log entry to the host logging system
    async fn log(&self, entry: LogEntry) -> Result<()>;

    /// Flush any buffered logs
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Minimum level that will be processed
    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

/// Logcat-formatted stdout logger for development and tests
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    pub min_level: LogLevel,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
        }
    }
}

impl ConsoleLogger {
    fn render(entry: &LogEntry) -> String {
        format!(
            "{} {}/{}: {}",
            entry.timestamp.format("%m-%d %H:%M:%S%.3f"),
            entry.level.letter(),
            entry.tag,
            entry.formatted_message()
        )
    }
}

#[async_trait::async_trait]
impl LoggerSink for ConsoleLogger {
    async fn log(&self, entry: LogEntry) -> Result<()> {
        if entry.level >= self.min_level {
            println!("{}", Self::render(&entry));
        }
        Ok(())
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
