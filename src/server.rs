//! Web server logging configuration
//!
//! Serializable handler/formatter/logger wiring that a front-end web server
//! adopts so framework-emitted records route through the same pipeline as
//! application records. The shape is static; only environment-derived values
//! (level, local no-op handler, exclusion patterns) are interpolated.

use crate::core::error::{Result, TelemetryError};
use crate::core::settings::LogSettings;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_LOGGER: &str = "default";
pub const ACCESS_LOGGER: &str = "access";
pub const ERROR_LOGGER: &str = "error";

const DEFAULT_HANDLER: &str = "default";
const ACCESS_HANDLER: &str = "access";
const OTEL_HANDLER: &str = "otel";

#[derive(Debug, Clone, Serialize)]
pub struct FormatterSpec {
    pub pattern: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamTarget {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerSpec {
    /// Console stream handler using a named formatter.
    Stream {
        formatter: String,
        stream: StreamTarget,
    },
    /// Telemetry handler exporting through the OTLP pipeline.
    Otel { level: String },
    /// Drops every record; stands in for the telemetry handler when local.
    Noop,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggerSpec {
    pub handlers: Vec<String>,
    pub level: String,
    pub propagate: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterSpec {
    pub pattern: String,
}

/// Logging configuration consumable by the web server's logging subsystem.
#[derive(Debug, Clone, Serialize)]
pub struct ServerLogConfig {
    pub version: u32,
    pub disable_existing_loggers: bool,
    pub formatters: BTreeMap<String, FormatterSpec>,
    pub handlers: BTreeMap<String, HandlerSpec>,
    pub filters: BTreeMap<String, FilterSpec>,
    pub loggers: BTreeMap<String, LoggerSpec>,
}

impl ServerLogConfig {
    /// Build the configuration for the given settings snapshot.
    ///
    /// # Errors
    ///
    /// Fails on an unknown configured log level.
    pub fn from_settings(settings: &LogSettings) -> Result<Self> {
        let level = settings.log_level()?.as_str().to_string();

        let mut formatters = BTreeMap::new();
        formatters.insert(
            "default".to_string(),
            FormatterSpec {
                pattern: "{timestamp} {level} {message}".to_string(),
            },
        );
        formatters.insert(
            "access".to_string(),
            FormatterSpec {
                pattern: "{timestamp} {level} {client_addr} \"{request_line}\" {status_code}"
                    .to_string(),
            },
        );

        let mut handlers = BTreeMap::new();
        handlers.insert(
            DEFAULT_HANDLER.to_string(),
            HandlerSpec::Stream {
                formatter: "default".to_string(),
                stream: StreamTarget::Stderr,
            },
        );
        handlers.insert(
            ACCESS_HANDLER.to_string(),
            HandlerSpec::Stream {
                formatter: "access".to_string(),
                stream: StreamTarget::Stdout,
            },
        );
        // Telemetry emission is disabled outright in the local environment.
        let otel_handler = if settings.otel_logging_enabled() {
            HandlerSpec::Otel {
                level: level.clone(),
            }
        } else {
            HandlerSpec::Noop
        };
        handlers.insert(OTEL_HANDLER.to_string(), otel_handler);

        let mut filters = BTreeMap::new();
        let mut access_filters = Vec::new();
        if !settings.show_otel_200_requests {
            for pattern in &settings.excluded_urls {
                let name = filter_name(pattern);
                filters.insert(
                    name.clone(),
                    FilterSpec {
                        pattern: pattern.clone(),
                    },
                );
                access_filters.push(name);
            }
        }

        let mut loggers = BTreeMap::new();
        loggers.insert(
            DEFAULT_LOGGER.to_string(),
            LoggerSpec {
                handlers: vec![DEFAULT_HANDLER.to_string(), OTEL_HANDLER.to_string()],
                level: level.clone(),
                propagate: true,
                filters: Vec::new(),
            },
        );
        loggers.insert(
            ERROR_LOGGER.to_string(),
            LoggerSpec {
                handlers: vec![DEFAULT_HANDLER.to_string(), OTEL_HANDLER.to_string()],
                level: level.clone(),
                propagate: false,
                filters: Vec::new(),
            },
        );
        loggers.insert(
            ACCESS_LOGGER.to_string(),
            LoggerSpec {
                handlers: vec![ACCESS_HANDLER.to_string(), OTEL_HANDLER.to_string()],
                level,
                propagate: false,
                filters: access_filters,
            },
        );

        Ok(Self {
            version: 1,
            disable_existing_loggers: false,
            formatters,
            handlers,
            filters,
            loggers,
        })
    }
}

fn filter_name(pattern: &str) -> String {
    let sanitized: String = pattern
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("exclude_{}", sanitized)
}

/// Drops access-log records whose message matches an excluded URL pattern.
#[derive(Debug, Clone)]
pub struct EndpointFilter {
    pattern: Regex,
    show_all: bool,
}

impl EndpointFilter {
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidPattern`] if the pattern is not a
    /// valid regular expression.
    pub fn new(pattern: &str, show_all: bool) -> Result<Self> {
        let pattern =
            Regex::new(pattern).map_err(|e| TelemetryError::pattern(pattern, e.to_string()))?;
        Ok(Self { pattern, show_all })
    }

    /// Whether the record should pass through to the handlers.
    pub fn allows(&self, message: &str) -> bool {
        self.show_all || !self.pattern.is_match(message)
    }
}

/// Compile the access-log filters configured in the settings.
///
/// # Errors
///
/// Fails if any excluded URL pattern is not a valid regular expression.
pub fn access_log_filters(settings: &LogSettings) -> Result<Vec<EndpointFilter>> {
    settings
        .excluded_urls
        .iter()
        .map(|pattern| EndpointFilter::new(pattern, settings.show_otel_200_requests))
        .collect()
}
