//! Log level definitions and severity mapping

use crate::core::error::TelemetryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Lowercase name, as used in filter directives and server log configs.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            // Fatal records are emitted at the error level; the tracing
            // facility has no fatal level.
            LogLevel::Error | LogLevel::Fatal => "error",
        }
    }

    /// Numeric severity following the OpenTelemetry log data model.
    pub fn severity(&self) -> u8 {
        match self {
            LogLevel::Trace => 1,
            LogLevel::Debug => 5,
            LogLevel::Info => 9,
            LogLevel::Warn => 13,
            LogLevel::Error => 17,
            LogLevel::Fatal => 21,
        }
    }

    pub fn as_tracing_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error | LogLevel::Fatal => Level::ERROR,
        }
    }

    pub fn as_level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.as_tracing_level())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            // The platform convention logs critical as error; both names
            // resolve to the top severity.
            "FATAL" | "CRITICAL" => Ok(LogLevel::Fatal),
            _ => Err(TelemetryError::InvalidLogLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_supported_levels() {
        let cases = [
            ("trace", LogLevel::Trace),
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("warning", LogLevel::Warn),
            ("error", LogLevel::Error),
            ("fatal", LogLevel::Fatal),
            ("critical", LogLevel::Fatal),
            ("INFO", LogLevel::Info),
            ("Warning", LogLevel::Warn),
        ];

        for (input, expected) in cases {
            let parsed: LogLevel = input.parse().expect("level should parse");
            assert_eq!(parsed, expected, "input: {}", input);
        }
    }

    #[test]
    fn test_parse_unknown_level_fails() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidLogLevel(_)));
        assert_eq!(err.to_string(), "Invalid log level: 'verbose'");
    }

    #[test]
    fn test_severity_numbers() {
        assert_eq!(LogLevel::Trace.severity(), 1);
        assert_eq!(LogLevel::Debug.severity(), 5);
        assert_eq!(LogLevel::Info.severity(), 9);
        assert_eq!(LogLevel::Warn.severity(), 13);
        assert_eq!(LogLevel::Error.severity(), 17);
        assert_eq!(LogLevel::Fatal.severity(), 21);
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_fatal_maps_to_error_level() {
        assert_eq!(LogLevel::Fatal.as_tracing_level(), Level::ERROR);
        assert_eq!(LogLevel::Fatal.as_filter_str(), "error");
    }

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogLevel::Info.as_filter_str(), "info");
    }
}
