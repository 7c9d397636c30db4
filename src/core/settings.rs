//! Environment-derived logging and telemetry settings
//!
//! `LogSettings` is a read-once snapshot of the environment, taken at process
//! start and treated as immutable afterwards. Services construct it with
//! [`LogSettings::from_env`] and pass it down explicitly; nothing in this
//! crate reads the environment after the snapshot.

use crate::core::error::{Result, TelemetryError};
use crate::core::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_OVERRIDE_LOCAL_OTEL_LOGGING: &str = "OVERRIDE_LOCAL_OTEL_LOGGING";
pub const ENV_SHOW_OTEL_200_REQUESTS: &str = "SHOW_OTEL_200_REQUESTS";
pub const ENV_LOGS_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_LOGS_ENDPOINT";
pub const ENV_TRACES_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_TRACES_ENDPOINT";
pub const ENV_LOG_CORRELATION: &str = "OTEL_LOG_CORRELATION";
pub const ENV_EXCLUDED_URLS: &str = "OTEL_EXCLUDED_URLS";

/// Environment name that switches the crate to console-only logging.
pub const LOCAL_ENVIRONMENT: &str = "local";

/// Default OTLP gRPC endpoint, used when the endpoint variables are unset.
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// URL fragments excluded from access-log collection unless overridden.
pub const DEFAULT_EXCLUDED_URLS: [&str; 3] = ["healthcheck", "health", "metrics"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Deployment environment name (`local` disables telemetry emission).
    pub environment: String,
    /// Log level string; parsed lazily via [`LogSettings::log_level`].
    pub log_level: String,
    /// Force telemetry export even in the local environment.
    pub override_local_otel_logging: bool,
    /// Keep successful health/metrics requests in the access log.
    pub show_otel_200_requests: bool,
    /// OTLP endpoint for log records; default endpoint when `None`.
    pub logs_endpoint: Option<String>,
    /// OTLP endpoint for trace spans; default endpoint when `None`.
    pub traces_endpoint: Option<String>,
    /// Include span context in deployed-environment console records.
    pub log_correlation: bool,
    /// URL patterns excluded from access-log collection.
    pub excluded_urls: Vec<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            environment: String::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            override_local_otel_logging: false,
            show_otel_200_requests: false,
            logs_endpoint: None,
            traces_endpoint: None,
            log_correlation: false,
            excluded_urls: DEFAULT_EXCLUDED_URLS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LogSettings {
    /// Snapshot the settings from the process environment.
    ///
    /// Missing variables take their defaults; malformed boolean values fail
    /// fast so misconfiguration is caught at startup.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidConfiguration`] for malformed values
    /// and [`TelemetryError::NonUnicodeEnvironment`] for non-unicode ones.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let excluded_urls = match read_var(ENV_EXCLUDED_URLS)? {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.excluded_urls,
        };

        Ok(Self {
            environment: read_var(ENV_ENVIRONMENT)?.unwrap_or(defaults.environment),
            log_level: read_var(ENV_LOG_LEVEL)?.unwrap_or(defaults.log_level),
            override_local_otel_logging: read_bool_var(ENV_OVERRIDE_LOCAL_OTEL_LOGGING)?
                .unwrap_or(defaults.override_local_otel_logging),
            show_otel_200_requests: read_bool_var(ENV_SHOW_OTEL_200_REQUESTS)?
                .unwrap_or(defaults.show_otel_200_requests),
            logs_endpoint: read_var(ENV_LOGS_ENDPOINT)?,
            traces_endpoint: read_var(ENV_TRACES_ENDPOINT)?,
            log_correlation: read_bool_var(ENV_LOG_CORRELATION)?
                .unwrap_or(defaults.log_correlation),
            excluded_urls,
        })
    }

    /// Parse the configured level string into a [`LogLevel`].
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidLogLevel`] for unknown level strings.
    pub fn log_level(&self) -> Result<LogLevel> {
        self.log_level.parse()
    }

    pub fn is_local(&self) -> bool {
        self.environment.eq_ignore_ascii_case(LOCAL_ENVIRONMENT)
    }

    /// Whether log records should be exported to the telemetry backend.
    pub fn otel_logging_enabled(&self) -> bool {
        !self.is_local() || self.override_local_otel_logging
    }

    /// Whether trace spans should be exported to the telemetry backend.
    pub fn otel_tracing_enabled(&self) -> bool {
        !self.is_local()
    }

    pub fn logs_endpoint(&self) -> &str {
        self.logs_endpoint.as_deref().unwrap_or(DEFAULT_OTLP_ENDPOINT)
    }

    pub fn traces_endpoint(&self) -> &str {
        self.traces_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_OTLP_ENDPOINT)
    }
}

fn read_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(TelemetryError::NonUnicodeEnvironment(name.to_string()))
        }
    }
}

fn read_bool_var(name: &str) -> Result<Option<bool>> {
    match read_var(name)? {
        Some(value) => parse_bool(name, &value).map(Some),
        None => Ok(None),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(TelemetryError::config(
            "LogSettings",
            format!("{} is not a boolean: '{}'", name, other),
        )),
    }
}
