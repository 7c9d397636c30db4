//! # telemetry-config
//!
//! A thin, opinionated configuration layer over the `tracing` facility and
//! the OpenTelemetry SDK, shared by platform services.
//!
//! ## Features
//!
//! - **Environment-driven**: one immutable settings snapshot taken at startup
//! - **Local-friendly**: console-only logging when `ENVIRONMENT=local`
//! - **OTLP export**: log records and trace spans shipped to the collector
//!   endpoints configured through the standard `OTEL_EXPORTER_OTLP_*` variables
//! - **Named loggers**: cached adapters with the handler set attached exactly
//!   once per process
//!
//! ## Example
//!
//! ```no_run
//! use telemetry_config::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> telemetry_config::Result<()> {
//!     let telemetry = Telemetry::init("dialogue-service")?;
//!
//!     let logger = telemetry.logger("app");
//!     logger.info("service started");
//!
//!     telemetry.shutdown()?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod handlers;
pub mod server;
pub mod telemetry;
pub mod tracer;

pub mod prelude {
    pub use crate::core::{
        LogLevel, LogSettings, LoggerRegistry, Result, ScopedLogger, TelemetryError,
    };
    pub use crate::handlers::{console_layer, OtelLogHandler};
    pub use crate::server::{EndpointFilter, ServerLogConfig};
    pub use crate::telemetry::{Telemetry, TelemetryBuilder};
}

pub use self::core::{
    LogLevel, LogSettings, LoggerRegistry, Result, ScopedLogger, TelemetryError,
};
pub use self::handlers::{console_layer, OtelLogHandler};
pub use self::server::{
    access_log_filters, EndpointFilter, FilterSpec, FormatterSpec, HandlerSpec, LoggerSpec,
    ServerLogConfig, StreamTarget,
};
pub use self::telemetry::{is_initialised, Telemetry, TelemetryBuilder};
pub use self::tracer::init_tracer_provider;
