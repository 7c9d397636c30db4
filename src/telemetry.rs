//! One-time telemetry initialisation
//!
//! [`TelemetryBuilder`] assembles the whole pipeline from a settings snapshot:
//! console layer, telemetry log handler, level filter, and optionally the span
//! export pipeline. [`TelemetryBuilder::init`] installs the handlers on the
//! process-wide subscriber exactly once; the returned [`Telemetry`] object is
//! the explicit, passed-down owner of the providers and the named-logger
//! cache. Providers are flushed and shut down when it is dropped.

use crate::core::error::{Result, TelemetryError};
use crate::core::log_level::LogLevel;
use crate::core::logger::{LoggerRegistry, ScopedLogger};
use crate::core::settings::LogSettings;
use crate::handlers::{console_layer, OtelLogHandler};
use crate::tracer::init_tracer_provider;
use opentelemetry::global::BoxedTracer;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Whether a process-wide subscriber has already been installed.
pub fn is_initialised() -> bool {
    tracing::dispatcher::has_been_set()
}

fn service_resource(service_name: &str, service_version: Option<&str>) -> Resource {
    let mut attributes = vec![KeyValue::new(
        resource::SERVICE_NAME,
        service_name.to_string(),
    )];
    if let Some(version) = service_version {
        attributes.push(KeyValue::new(
            resource::SERVICE_VERSION,
            version.to_string(),
        ));
    }
    Resource::builder().with_attributes(attributes).build()
}

fn build_env_filter(level: LogLevel) -> EnvFilter {
    let mut directives = level.as_filter_str().to_string();
    // Transport crates used by the exporters are chatty at info level; keep
    // them out of the pipeline unless someone is actively debugging.
    if !matches!(level, LogLevel::Trace | LogLevel::Debug) {
        for noisy in ["hyper", "tonic", "h2", "reqwest", "tower"] {
            directives.push_str(&format!(",{}=off", noisy));
        }
    }
    EnvFilter::new(directives)
}

/// Builder for the process-wide telemetry pipeline.
pub struct TelemetryBuilder {
    service_name: String,
    service_version: Option<String>,
    settings: Option<LogSettings>,
    logger_provider: Option<SdkLoggerProvider>,
    enable_tracing: bool,
}

impl TelemetryBuilder {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: None,
            settings: None,
            logger_provider: None,
            enable_tracing: true,
        }
    }

    /// Use an explicit settings snapshot instead of reading the environment.
    #[must_use]
    pub fn with_settings(mut self, settings: LogSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Record the service version on the exported resource.
    #[must_use]
    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Use an existing logger provider instead of building the OTLP pipeline.
    ///
    /// The local-environment no-op guard still applies on top of it.
    #[must_use]
    pub fn with_logger_provider(mut self, provider: SdkLoggerProvider) -> Self {
        self.logger_provider = Some(provider);
        self
    }

    /// Skip the span export pipeline entirely.
    #[must_use]
    pub fn without_tracing(mut self) -> Self {
        self.enable_tracing = false;
        self
    }

    /// Build the pipeline and install it on the process-wide subscriber.
    ///
    /// # Errors
    ///
    /// Fails fast on malformed settings or an unbuildable exporter, and with
    /// [`TelemetryError::AlreadyInitialised`] if a subscriber was installed
    /// before; handlers are never attached twice.
    pub fn init(self) -> Result<Telemetry> {
        let settings = match self.settings {
            Some(settings) => settings,
            None => LogSettings::from_env()?,
        };
        let level = settings.log_level()?;
        let resource = service_resource(&self.service_name, self.service_version.as_deref());

        let (handler, logger_provider) = match self.logger_provider {
            Some(provider) => (OtelLogHandler::new(&settings, &provider), Some(provider)),
            None => OtelLogHandler::from_settings(&settings, resource.clone())?,
        };

        let tracer_provider = if self.enable_tracing {
            init_tracer_provider(&settings, resource)?
        } else {
            None
        };

        let registry = tracing_subscriber::registry()
            .with(build_env_filter(level))
            .with(console_layer(&settings))
            .with(handler);

        let installed = match &tracer_provider {
            Some(provider) => {
                let tracer = provider.tracer(self.service_name.clone());
                registry
                    .with(tracing_opentelemetry::layer().with_tracer(tracer))
                    .try_init()
            }
            None => registry.try_init(),
        };
        // try_init only fails when a global default is already in place.
        installed.map_err(|_| TelemetryError::AlreadyInitialised)?;

        Ok(Telemetry {
            service_name: self.service_name,
            settings,
            min_level: level,
            logger_provider,
            tracer_provider,
            loggers: LoggerRegistry::new(),
        })
    }
}

/// Explicit owner of the telemetry pipeline for one service process.
///
/// Constructed once at startup and passed down; there is no ambient
/// provider singleton beyond the facility's own dispatcher.
pub struct Telemetry {
    service_name: String,
    settings: LogSettings,
    min_level: LogLevel,
    logger_provider: Option<SdkLoggerProvider>,
    tracer_provider: Option<SdkTracerProvider>,
    loggers: LoggerRegistry,
}

impl Telemetry {
    pub fn builder(service_name: impl Into<String>) -> TelemetryBuilder {
        TelemetryBuilder::new(service_name)
    }

    /// Initialise with settings read from the environment.
    ///
    /// # Errors
    ///
    /// See [`TelemetryBuilder::init`].
    pub fn init(service_name: impl Into<String>) -> Result<Self> {
        Self::builder(service_name).init()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// Return the named logger, creating and caching it on first use.
    ///
    /// Idempotent: the same name always yields the same adapter, and no
    /// handler is ever attached more than once.
    pub fn logger(&self, name: &str) -> Arc<ScopedLogger> {
        self.loggers.get(name, self.min_level)
    }

    /// A tracer from the globally registered provider.
    pub fn tracer(&self, scope: &'static str) -> BoxedTracer {
        opentelemetry::global::tracer(scope)
    }

    /// Flush and shut down the export pipelines.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Shutdown`] if either provider reports a
    /// flush or shutdown failure.
    pub fn shutdown(mut self) -> Result<()> {
        self.shutdown_providers().map_err(TelemetryError::Shutdown)
    }

    fn shutdown_providers(&mut self) -> std::result::Result<(), String> {
        let mut errors = Vec::new();

        if let Some(provider) = self.logger_provider.take() {
            if let Err(e) = provider.shutdown() {
                errors.push(format!("logs: {}", e));
            }
        }
        if let Some(provider) = self.tracer_provider.take() {
            if let Err(e) = provider.shutdown() {
                errors.push(format!("traces: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        // Best effort: explicit shutdown() already emptied the providers.
        let _ = self.shutdown_providers();
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("service_name", &self.service_name)
            .field("min_level", &self.min_level)
            .field("logger_provider", &self.logger_provider.is_some())
            .field("tracer_provider", &self.tracer_provider.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_silences_transport_crates() {
        let filter = build_env_filter(LogLevel::Info);
        let rendered = filter.to_string();
        assert!(rendered.contains("info"));
        assert!(rendered.contains("hyper=off"));
        assert!(rendered.contains("tonic=off"));
    }

    #[test]
    fn test_env_filter_keeps_transport_crates_when_debugging() {
        let filter = build_env_filter(LogLevel::Debug);
        let rendered = filter.to_string();
        assert!(!rendered.contains("hyper=off"));
    }

    #[test]
    fn test_service_resource_attributes() {
        let resource = service_resource("dialogue-service", Some("1.4.2"));

        let lookup = |key: &str| {
            resource
                .iter()
                .find(|(k, _)| k.as_str() == key)
                .map(|(_, v)| v.to_string())
        };
        assert_eq!(lookup("service.name").as_deref(), Some("dialogue-service"));
        assert_eq!(lookup("service.version").as_deref(), Some("1.4.2"));

        let without_version = service_resource("dialogue-service", None);
        let has_version = without_version
            .iter()
            .any(|(k, _)| k.as_str() == "service.version");
        assert!(!has_version);
    }
}
