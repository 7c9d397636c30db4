//! Error types for the telemetry configuration layer

pub type Result<T> = std::result::Result<T, TelemetryError>;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Unknown log level string
    #[error("Invalid log level: '{0}'")]
    InvalidLogLevel(String),

    /// Environment variable present but not valid unicode
    #[error("Environment variable '{0}' is not valid unicode")]
    NonUnicodeEnvironment(String),

    /// OTLP exporter construction failure
    #[error("Failed to build OTLP exporter for {signal}: {message}")]
    ExporterBuild { signal: String, message: String },

    /// The global subscriber was already installed
    #[error("Telemetry already initialised for this process")]
    AlreadyInitialised,

    /// Invalid endpoint filter pattern
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Provider flush/shutdown failure
    #[error("Telemetry shutdown failed: {0}")]
    Shutdown(String),
}

impl TelemetryError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        TelemetryError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an exporter build error
    pub fn exporter(signal: impl Into<String>, message: impl Into<String>) -> Self {
        TelemetryError::ExporterBuild {
            signal: signal.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        TelemetryError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = TelemetryError::config("LogSettings", "bad boolean");
        assert!(matches!(err, TelemetryError::InvalidConfiguration { .. }));

        let err = TelemetryError::exporter("logs", "endpoint refused");
        assert!(matches!(err, TelemetryError::ExporterBuild { .. }));

        let err = TelemetryError::pattern("(", "unclosed group");
        assert!(matches!(err, TelemetryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = TelemetryError::InvalidLogLevel("verbose".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'verbose'");

        let err = TelemetryError::config("LogSettings", "SHOW_OTEL_200_REQUESTS is not a boolean");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for LogSettings: SHOW_OTEL_200_REQUESTS is not a boolean"
        );

        let err = TelemetryError::AlreadyInitialised;
        assert_eq!(
            err.to_string(),
            "Telemetry already initialised for this process"
        );
    }
}
