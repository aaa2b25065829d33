//! Test utilities for Fibonacci Lambda tests.
//!
//! Provides:
//! - Request builders
//! - A telemetry fixture that records finished spans in memory

#![allow(dead_code)]

use std::sync::Arc;

use fibonacci_lambda::config::GetMode;
use fibonacci_lambda::{Request, RequestRouter, Telemetry, TracingEnvelope};
use http::Method;
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::testing::trace::InMemorySpanExporter;
use opentelemetry_sdk::trace::TracerProvider;

/// Test fixture that owns an in-memory span exporter.
///
/// Spans are exported synchronously when they end, so the exporter reflects
/// every finished span as soon as an invocation returns.
pub struct TracingFixture {
    pub exporter: InMemorySpanExporter,
    pub telemetry: Arc<Telemetry>,
}

impl TracingFixture {
    pub fn new() -> Self {
        let exporter = InMemorySpanExporter::default();
        let provider = TracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        let telemetry = Arc::new(Telemetry::with_provider(provider, "fibonacci-lambda-test"));
        Self {
            exporter,
            telemetry,
        }
    }

    /// Envelope around a router in the given mode.
    pub fn envelope(&self, mode: GetMode) -> TracingEnvelope {
        TracingEnvelope::new(
            RequestRouter::new(mode),
            Arc::clone(&self.telemetry),
            "fibonacci-lambda",
        )
    }

    pub fn finished_spans(&self) -> Vec<SpanData> {
        self.exporter
            .get_finished_spans()
            .expect("in-memory exporter should be readable")
    }
}

impl Default for TracingFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_number(value: &str) -> Request {
    Request::new(Method::GET).with_query("number", value)
}

pub fn post_body(body: &str) -> Request {
    Request::new(Method::POST).with_body(body)
}
