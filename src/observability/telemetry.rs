//! Tracer provider lifecycle.
//!
//! Builds the OTLP/HTTP export pipeline once per process and hands it out
//! as an explicit [`Telemetry`] value. Nothing is registered globally; the
//! envelope and the logging layer receive the tracer they use.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use opentelemetry::propagation::{Extractor, TextMapCompositePropagator, TextMapPropagator};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{Context, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use opentelemetry_sdk::trace::{Config, Sampler, Tracer, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};
use url::Url;

use crate::error::TelemetryError;

// Semantic convention keys
const SERVICE_NAME: &str = "service.name";
const SERVICE_VERSION: &str = "service.version";

/// Trace export settings.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Collector host, with or without scheme (e.g. `abc123.live.example.com`)
    pub endpoint: String,
    /// Path appended to the host (e.g. `/api/v2/otlp/v1/traces`)
    pub url_path: String,
    /// Token sent as `Authorization: Api-Token <token>`
    pub api_token: String,
    pub service_name: String,
    pub service_version: String,
}

impl TelemetryConfig {
    /// Full URL spans are posted to.
    ///
    /// A missing scheme defaults to `https`. Only `http` and `https` are
    /// accepted.
    pub fn traces_endpoint(&self) -> Result<String, TelemetryError> {
        let host = self.endpoint.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(TelemetryError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: "endpoint is empty".into(),
            });
        }

        let base = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };

        let path = self.url_path.trim();
        let joined = if path.is_empty() || path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };

        let url = Url::parse(&joined).map_err(|e| TelemetryError::InvalidEndpoint {
            endpoint: joined.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TelemetryError::InvalidEndpoint {
                endpoint: joined,
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }

        Ok(url.to_string())
    }

    fn headers(&self) -> HashMap<String, String> {
        HashMap::from([(
            "Authorization".to_string(),
            format!("Api-Token {}", self.api_token),
        )])
    }

    fn resource(&self) -> Resource {
        Resource::new([
            KeyValue::new(SERVICE_NAME, self.service_name.clone()),
            KeyValue::new(SERVICE_VERSION, self.service_version.clone()),
        ])
    }
}

/// Process-wide tracing pipeline.
///
/// Shut down exactly once, either through [`Telemetry::shutdown`] or when the
/// value is dropped.
#[derive(Debug)]
pub struct Telemetry {
    provider: TracerProvider,
    tracer: Tracer,
    propagator: TextMapCompositePropagator,
    export_endpoint: Option<String>,
    shut_down: AtomicBool,
}

impl Telemetry {
    /// Build the OTLP exporter and a batching, always-sampling provider.
    ///
    /// Must be called from inside a Tokio runtime: the batch processor runs
    /// as a Tokio task.
    pub fn init(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let endpoint = config.traces_endpoint()?;

        let exporter = opentelemetry_otlp::new_exporter()
            .http()
            .with_endpoint(endpoint.clone())
            .with_headers(config.headers())
            .build_span_exporter()?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_config(
                Config::default()
                    .with_sampler(Sampler::AlwaysOn)
                    .with_resource(config.resource()),
            )
            .build();

        let mut telemetry = Self::with_provider(provider, &config.service_name);
        telemetry.export_endpoint = Some(endpoint);
        Ok(telemetry)
    }

    /// Wrap an already built provider.
    pub fn with_provider(provider: TracerProvider, tracer_name: &str) -> Self {
        let tracer = provider.tracer(tracer_name.to_string());
        Self {
            provider,
            tracer,
            propagator: TextMapCompositePropagator::new(vec![
                Box::new(TraceContextPropagator::new()),
                Box::new(BaggagePropagator::new()),
            ]),
            export_endpoint: None,
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// URL spans are exported to, when built by [`Telemetry::init`].
    pub fn export_endpoint(&self) -> Option<&str> {
        self.export_endpoint.as_deref()
    }

    /// Parent context propagated through request headers (W3C trace context
    /// and baggage). Header names must be lowercase.
    pub fn extract_context(&self, headers: &HashMap<String, String>) -> Context {
        self.propagator.extract(&HeaderExtractor(headers))
    }

    /// Export every buffered span now.
    ///
    /// Blocks until the exporter answers. Failures are logged, never
    /// returned. No-op after shutdown.
    pub fn force_flush(&self) {
        if self.is_shut_down() {
            return;
        }

        for result in self.provider.force_flush() {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Error flushing tracer provider");
            }
        }
    }

    /// Flush buffered spans and release the exporter.
    ///
    /// Failures are logged, never returned. Later calls are no-ops.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.provider.shutdown() {
            Ok(()) => tracing::info!("OpenTelemetry tracing shutdown complete"),
            Err(e) => tracing::warn!(error = %e, "Error shutting down tracer provider"),
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct HeaderExtractor<'a>(&'a HashMap<String, String>);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}
