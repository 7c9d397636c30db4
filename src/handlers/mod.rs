//! Log handler implementations

pub mod console;
pub mod otel;

pub use console::console_layer;
pub use otel::OtelLogHandler;
