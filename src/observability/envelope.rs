//! Per-invocation span.
//!
//! Every call to [`TracingEnvelope::invoke`] starts one server span, routes
//! the request inside it and ends it before returning. The span also ends if
//! routing unwinds, because the context holding it is dropped.

use std::sync::Arc;
use std::time::Instant;

use opentelemetry::trace::{SpanKind, Status, TraceContextExt, Tracer as _};
use opentelemetry::KeyValue;

use super::telemetry::Telemetry;
use crate::handler::{Request, RequestRouter, Response};

/// Wraps a [`RequestRouter`] so that each invocation is traced.
#[derive(Debug, Clone)]
pub struct TracingEnvelope {
    router: RequestRouter,
    telemetry: Arc<Telemetry>,
    span_name: String,
    flush_per_invocation: bool,
}

impl TracingEnvelope {
    pub fn new(router: RequestRouter, telemetry: Arc<Telemetry>, span_name: impl Into<String>) -> Self {
        Self {
            router,
            telemetry,
            span_name: span_name.into(),
            flush_per_invocation: false,
        }
    }

    /// Force-flush the provider after every invocation.
    ///
    /// For hosts that freeze the process between invocations, where the
    /// batch processor would otherwise never get to run.
    pub fn with_flush_per_invocation(mut self, enabled: bool) -> Self {
        self.flush_per_invocation = enabled;
        self
    }

    /// Run one invocation inside its own span.
    ///
    /// The span is a child of whatever trace context the request headers
    /// carry. The response is passed through unchanged. With per-invocation
    /// flushing this blocks on the exporter, so async callers should run it
    /// under `tokio::task::block_in_place`.
    pub fn invoke(&self, request: &Request) -> Response {
        let started = Instant::now();
        let parent_cx = self.telemetry.extract_context(&request.headers);

        let mut attributes = vec![
            KeyValue::new("faas.trigger", "http"),
            KeyValue::new("http.request.method", request.method.as_str().to_string()),
            KeyValue::new("handler.mode", self.router.mode().as_str()),
        ];
        if let Some(request_id) = &request.request_id {
            attributes.push(KeyValue::new("faas.invocation_id", request_id.clone()));
        }

        let tracer = self.telemetry.tracer();
        let span = tracer
            .span_builder(self.span_name.clone())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start_with_context(tracer, &parent_cx);
        let cx = parent_cx.with_span(span);

        let response = {
            let _attached = cx.clone().attach();
            self.router.handle(request)
        };

        let span = cx.span();
        span.set_attribute(KeyValue::new(
            "http.response.status_code",
            i64::from(response.status_code),
        ));
        if response.is_server_error() {
            span.set_status(Status::error(format!(
                "handler returned status {}",
                response.status_code
            )));
        }
        span.end();

        if self.flush_per_invocation {
            self.telemetry.force_flush();
        }

        tracing::info!(
            method = %request.method,
            status = response.status_code,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Invocation completed"
        );

        response
    }
}
