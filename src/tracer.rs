//! Trace span export pipeline
//!
//! Wires an OTLP span exporter to a batch processor and registers the
//! provider globally, with W3C trace-context propagation so incoming request
//! context joins up with exported spans. Span batching, retry, and flush
//! behaviour all belong to the OpenTelemetry SDK.

use crate::core::error::{Result, TelemetryError};
use crate::core::settings::LogSettings;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{BatchSpanProcessor, Sampler, SdkTracerProvider};
use opentelemetry_sdk::Resource;

/// Build and globally register the span export pipeline.
///
/// Returns `None` in the local environment: spans stay in-process and
/// nothing is exported.
///
/// # Errors
///
/// Returns [`TelemetryError::ExporterBuild`] if the OTLP span exporter
/// cannot be constructed from the configured endpoint.
pub fn init_tracer_provider(
    settings: &LogSettings,
    resource: Resource,
) -> Result<Option<SdkTracerProvider>> {
    if !settings.otel_tracing_enabled() {
        return Ok(None);
    }

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(settings.traces_endpoint())
        .build()
        .map_err(|e| TelemetryError::exporter("traces", e.to_string()))?;

    let processor = BatchSpanProcessor::builder(exporter).build();

    let provider = SdkTracerProvider::builder()
        .with_span_processor(processor)
        .with_resource(resource)
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
        .build();

    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());
    opentelemetry::global::set_tracer_provider(provider.clone());

    Ok(Some(provider))
}
