//! Integration tests for the deployed-environment pipeline
//!
//! These tests verify:
//! - Records flow end to end from named loggers to the exporter
//! - Message, severity, and logger name survive the bridge
//! - Named loggers are cached and handlers attach exactly once
//! - Shutdown flushes cleanly
//!
//! The subscriber is process-wide, so everything runs in a single test.

use opentelemetry::logs::AnyValue;
use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLoggerProvider};
use std::sync::Arc;
use telemetry_config::prelude::*;

fn deployed_settings() -> LogSettings {
    LogSettings {
        environment: "production".to_string(),
        log_level: "debug".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_deployed_pipeline_end_to_end() {
    let exporter = InMemoryLogExporter::default();
    let provider = SdkLoggerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();

    let telemetry = Telemetry::builder("dialogue-service")
        .with_settings(deployed_settings())
        .with_service_version("1.0.0")
        .with_logger_provider(provider)
        .without_tracing()
        .init()
        .expect("first initialisation succeeds");

    assert!(telemetry_config::is_initialised());
    assert_eq!(telemetry.service_name(), "dialogue-service");

    // Same name, same cached adapter.
    let logger = telemetry.logger("app");
    let again = telemetry.logger("app");
    assert!(Arc::ptr_eq(&logger, &again));

    logger.info("service started");
    logger.debug("loading configuration");
    logger.trace("below the configured level");

    let emitted = exporter.get_emitted_logs().expect("exporter readable");
    assert_eq!(emitted.len(), 2, "trace record must be filtered out");

    let record = &emitted[0].record;
    assert_eq!(record.severity_text(), Some("INFO"));
    match record.body() {
        Some(AnyValue::String(body)) => assert_eq!(body.as_str(), "service started"),
        other => panic!("unexpected body: {:?}", other),
    }
    let logger_name = record
        .attributes_iter()
        .find(|(key, _)| key.as_str() == "logger");
    assert!(
        matches!(logger_name, Some((_, AnyValue::String(v))) if v.as_str() == "app"),
        "logger name not preserved: {:?}",
        logger_name
    );

    // A second initialisation must never attach a second handler.
    let err = Telemetry::builder("dialogue-service")
        .with_settings(deployed_settings())
        .without_tracing()
        .init()
        .unwrap_err();
    assert!(matches!(err, TelemetryError::AlreadyInitialised));

    // Records emitted after the failed re-init still go through once.
    telemetry.logger("app.db").warn("slow query");
    let emitted = exporter.get_emitted_logs().expect("exporter readable");
    assert_eq!(emitted.len(), 3);

    telemetry.shutdown().expect("shutdown flushes cleanly");
}
