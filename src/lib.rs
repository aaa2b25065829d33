//! Fibonacci Lambda: a traced API-gateway function.
//!
//! Each invocation is dispatched on its HTTP method: `GET` computes a
//! Fibonacci number (or echoes a greeting), `POST` checks that the body is
//! well-formed JSON. Every invocation runs inside exactly one OpenTelemetry
//! span exported over OTLP/HTTP.
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`error`]: Error taxonomy
//! - [`handler`]: Request routing, Fibonacci, payload validation, gateway events
//! - [`observability`]: Logging, tracer lifecycle and the per-invocation span

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // handler::router::RequestRouter is fine
    clippy::must_use_candidate,      // Not all functions need #[must_use]
    clippy::missing_errors_doc,      // Error docs can be verbose
    clippy::missing_panics_doc       // Panic docs can be verbose
)]

pub mod config;
pub mod error;
pub mod handler;
pub mod observability;

pub use config::Config;
pub use handler::{Request, RequestRouter, Response};
pub use observability::{Telemetry, TracingEnvelope};
