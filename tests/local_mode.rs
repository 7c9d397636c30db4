//! Integration tests for the local environment
//!
//! `ENVIRONMENT=local` means console-only logging: the telemetry handler's
//! emit path drops every record and the server config degrades the otel
//! handler to a no-op.

use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLoggerProvider};
use telemetry_config::prelude::*;
use telemetry_config::HandlerSpec;

fn local_settings() -> LogSettings {
    LogSettings {
        environment: "local".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_local_environment_is_console_only() {
    let exporter = InMemoryLogExporter::default();
    let provider = SdkLoggerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();

    let telemetry = Telemetry::builder("dialogue-service")
        .with_settings(local_settings())
        .with_logger_provider(provider)
        .init()
        .expect("local initialisation succeeds");

    let logger = telemetry.logger("app");
    logger.info("console only");
    logger.error("even errors stay local");

    let emitted = exporter.get_emitted_logs().expect("exporter readable");
    assert!(emitted.is_empty(), "local records must never reach the exporter");

    let config = ServerLogConfig::from_settings(telemetry.settings()).expect("config");
    assert_eq!(config.handlers["otel"], HandlerSpec::Noop);
    for name in ["default", "access", "error"] {
        assert!(config.loggers.contains_key(name));
    }

    telemetry.shutdown().expect("shutdown is clean with nothing buffered");
}
