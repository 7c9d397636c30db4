//! Console output wiring
//!
//! Local development gets a compact, colored, human-readable format; deployed
//! environments get JSON so the platform log collector can parse records.

use crate::core::settings::LogSettings;
use std::io::IsTerminal;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Build the console layer matching the deployment environment.
pub fn console_layer<S>(settings: &LogSettings) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    if settings.is_local() {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(std::io::stdout().is_terminal())
            .with_target(true)
            .boxed()
    } else {
        json_layer(settings, std::io::stdout)
    }
}

fn json_layer<S, W>(settings: &LogSettings, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(settings.log_correlation)
        .with_span_list(settings.log_correlation)
        .with_writer(writer)
        .boxed()
}
