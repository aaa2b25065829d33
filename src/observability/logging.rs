//! Log subscriber setup.
//!
//! Configures structured logging with:
//! - Level filter from the configured directive
//! - Text or JSON output
//! - An OpenTelemetry layer, so instrumented functions running inside an
//!   invocation show up as children of the invocation span

use opentelemetry_sdk::trace::Tracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::error::TelemetryError;

/// Install the process-wide log subscriber.
///
/// # Arguments
///
/// * `log_level` - Filter directive (e.g. `info`, `fibonacci_lambda=debug`)
/// * `format` - Text or JSON lines
/// * `tracer` - Tracer for the OpenTelemetry layer, if spans should be exported
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(
    log_level: &str,
    format: LogFormat,
    tracer: Option<Tracer>,
) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let (text_layer, json_layer) = match format {
        LogFormat::Text => (
            Some(fmt::layer().with_target(true).with_ansi(false)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_current_span(true).with_span_list(false)),
        ),
    };

    let otel_layer = tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()?;

    tracing::info!(level = log_level, ?format, "Logging initialized");
    Ok(())
}

/// Initialize logging for tests (only logs errors).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("error")
        .with_test_writer()
        .try_init();
}
