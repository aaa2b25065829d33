//! OpenTelemetry observability infrastructure.
//!
//! Provides:
//! - Structured logging with an OpenTelemetry bridge
//! - The process-wide tracer provider and its shutdown
//! - One span per invocation

pub mod envelope;
pub mod logging;
pub mod telemetry;

pub use envelope::TracingEnvelope;
pub use telemetry::{Telemetry, TelemetryConfig};
