//! Core settings, level, and logger types

pub mod error;
pub mod log_level;
pub mod logger;
pub mod settings;

pub use error::{Result, TelemetryError};
pub use log_level::LogLevel;
pub use logger::{LoggerRegistry, ScopedLogger};
pub use settings::{LogSettings, DEFAULT_OTLP_ENDPOINT, LOCAL_ENVIRONMENT};
