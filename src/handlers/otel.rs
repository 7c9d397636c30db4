//! Telemetry-backed log handler
//!
//! Forwards records from the tracing facility to the OpenTelemetry logger
//! provider through the `opentelemetry-appender-tracing` bridge. The handler
//! composes around the bridge rather than subclassing SDK types: when the
//! deployment environment is local (and export is not overridden) the bridge
//! is simply absent and the emit path drops records silently.

use crate::core::error::{Result, TelemetryError};
use crate::core::settings::LogSettings;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::{SdkLogger, SdkLoggerProvider};
use opentelemetry_sdk::Resource;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

type Bridge = OpenTelemetryTracingBridge<SdkLoggerProvider, SdkLogger>;

pub struct OtelLogHandler {
    bridge: Option<Bridge>,
}

impl OtelLogHandler {
    /// Build a handler over an existing logger provider.
    ///
    /// The emit path is a no-op when the settings disable telemetry export;
    /// records are dropped without error and the exporter sees nothing.
    pub fn new(settings: &LogSettings, provider: &SdkLoggerProvider) -> Self {
        if settings.otel_logging_enabled() {
            Self {
                bridge: Some(OpenTelemetryTracingBridge::new(provider)),
            }
        } else {
            Self::disabled()
        }
    }

    /// A handler whose emit path drops every record.
    pub fn disabled() -> Self {
        Self { bridge: None }
    }

    /// Build the OTLP log export pipeline from settings.
    ///
    /// Returns the handler plus the owning provider so the caller controls
    /// flush and shutdown. Both are absent in the local environment.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::ExporterBuild`] if the OTLP exporter cannot
    /// be constructed from the configured endpoint.
    pub fn from_settings(
        settings: &LogSettings,
        resource: Resource,
    ) -> Result<(Self, Option<SdkLoggerProvider>)> {
        if !settings.otel_logging_enabled() {
            return Ok((Self::disabled(), None));
        }

        let exporter = opentelemetry_otlp::LogExporter::builder()
            .with_tonic()
            .with_endpoint(settings.logs_endpoint())
            .build()
            .map_err(|e| TelemetryError::exporter("logs", e.to_string()))?;

        let provider = SdkLoggerProvider::builder()
            .with_batch_exporter(exporter)
            .with_resource(resource)
            .build();

        let handler = Self::new(settings, &provider);
        Ok((handler, Some(provider)))
    }

    pub fn is_enabled(&self) -> bool {
        self.bridge.is_some()
    }
}

impl<S> Layer<S> for OtelLogHandler
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(bridge) = &self.bridge else {
            return;
        };

        // The export path logs through tracing as well; forwarding those
        // records would feed the exporter its own output.
        if event.metadata().target().starts_with("opentelemetry") {
            return;
        }

        bridge.on_event(event, ctx);
    }
}
