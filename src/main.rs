//! Fibonacci Lambda: a traced API-gateway function.
//!
//! # Usage
//!
//! Deployed as a function behind an API gateway. Configuration comes from
//! the environment:
//! - `URL`: OTLP collector host
//! - `URL_PATH`: Trace ingest path on the collector
//! - `API_TOKEN`: Collector API token
//! - `HANDLER_MODE`: `fibonacci` (default) or `echo`
//! - `FLUSH_PER_INVOCATION`: export each span before answering
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

use std::sync::Arc;

use anyhow::Context as _;
use fibonacci_lambda::handler::{ApiGatewayProxyRequest, ApiGatewayProxyResponse, Request};
use fibonacci_lambda::observability::logging::init_logging;
use fibonacci_lambda::{Config, Telemetry, TracingEnvelope};
use lambda_runtime::{service_fn, LambdaEvent};

/// Convert the gateway event, run it through the envelope, convert back.
async fn handle_event(
    envelope: &TracingEnvelope,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, lambda_runtime::Error> {
    let LambdaEvent { payload, context } = event;

    let mut request = Request::from(payload);
    if request.request_id.is_none() {
        request.request_id = Some(context.request_id);
    }

    // Flushing may block on the exporter
    let response = tokio::task::block_in_place(|| envelope.invoke(&request));
    Ok(ApiGatewayProxyResponse::from_response(response, &request.method))
}

/// Resolve on SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {
                        tracing::info!("Received SIGINT (Ctrl+C), initiating shutdown...");
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM, initiating shutdown...");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler, waiting for Ctrl+C only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        tracing::info!("Received Ctrl+C, initiating shutdown...");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    // The tracing pipeline is required; failing to build it aborts startup
    let telemetry = Arc::new(
        Telemetry::init(&config.telemetry()).context("failed to build tracing pipeline")?,
    );

    init_logging(
        &config.log_level,
        config.log_format,
        Some(telemetry.tracer().clone()),
    )?;

    tracing::info!(
        endpoint = telemetry.export_endpoint().unwrap_or_default(),
        service = %config.service_name,
        version = %config.service_version,
        "OpenTelemetry tracing initialized"
    );

    let envelope = TracingEnvelope::new(
        config.router(),
        Arc::clone(&telemetry),
        config.function_name.clone(),
    )
    .with_flush_per_invocation(config.flush_per_invocation);

    tracing::info!(
        function = %config.function_name,
        mode = config.mode.as_str(),
        flush_per_invocation = config.flush_per_invocation,
        version = env!("CARGO_PKG_VERSION"),
        "Starting function runtime"
    );

    let runtime = lambda_runtime::run(service_fn(move |event| {
        let envelope = envelope.clone();
        async move { handle_event(&envelope, event).await }
    }));

    let result = tokio::select! {
        result = runtime => result,
        () = shutdown_signal() => Ok(()),
    };

    // Flush buffered spans off the async workers; the batch processor needs them to drain
    let flushing = Arc::clone(&telemetry);
    tokio::task::spawn_blocking(move || flushing.shutdown())
        .await
        .context("tracer shutdown task panicked")?;

    tracing::info!("Fibonacci Lambda shutdown complete");
    result.map_err(|e| anyhow::anyhow!(e))
}
