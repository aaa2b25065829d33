//! Error types.
//!
//! Request-level errors never leave the handler: the router turns them into
//! 500 responses. Only [`TelemetryError`] reaches the process boundary, and
//! only during startup.

use thiserror::Error;

/// Largest `n` whose Fibonacci number fits in a `u64`.
pub const MAX_FIBONACCI_INPUT: u32 = 93;

/// The requested Fibonacci number does not fit in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported fibonacci number {n}: too large")]
pub struct RangeError {
    pub n: u32,
}

/// A payload is not well-formed JSON.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct SyntaxError(#[from] serde_json::Error);

impl SyntaxError {
    /// One-based line of the first syntax error.
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// One-based column of the first syntax error.
    pub fn column(&self) -> usize {
        self.0.column()
    }
}

/// Failure to build or install the tracing pipeline.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid OTLP endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(#[from] opentelemetry::trace::TraceError),

    #[error("Failed to install log subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
