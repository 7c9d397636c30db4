//! Named logger adapters
//!
//! The tracing facility dispatches every event to the handlers installed on
//! the process-wide subscriber, so a "named logger" here is a thin adapter
//! that stamps records with a logger name and applies the configured minimum
//! level. Adapters are cached by name: asking for the same name twice always
//! returns the same instance, and handler attachment never repeats because
//! handlers live on the subscriber, not on the adapter.

use crate::core::log_level::LogLevel;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A named, leveled logging adapter over the installed subscriber.
#[derive(Debug)]
pub struct ScopedLogger {
    name: String,
    min_level: LogLevel,
}

impl ScopedLogger {
    pub fn new(name: impl Into<String>, min_level: LogLevel) -> Self {
        Self {
            name: name.into(),
            min_level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Emit a record at the given level with the logger name attached.
    ///
    /// Fatal records are emitted at the error level; the facility has no
    /// fatal level of its own.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        match level {
            LogLevel::Trace => tracing::trace!(logger = %self.name, "{}", message),
            LogLevel::Debug => tracing::debug!(logger = %self.name, "{}", message),
            LogLevel::Info => tracing::info!(logger = %self.name, "{}", message),
            LogLevel::Warn => tracing::warn!(logger = %self.name, "{}", message),
            LogLevel::Error | LogLevel::Fatal => {
                tracing::error!(logger = %self.name, "{}", message)
            }
        }
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message.as_ref());
    }
}

/// Cache of named logger adapters, one per dotted name.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<ScopedLogger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached logger for `name`, creating it on first use.
    pub fn get(&self, name: &str, min_level: LogLevel) -> Arc<ScopedLogger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        // Another thread may have raced us between the read and write locks.
        Arc::clone(
            loggers
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(ScopedLogger::new(name, min_level))),
        )
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}
