//! Method dispatch.
//!
//! `GET` answers from a query parameter, `POST` validates the body as JSON.
//! The router never fails: every client or range error becomes a response.

use http::Method;

use super::fibonacci::fibonacci;
use super::payload::validate;
use super::request::{Request, Response};
use crate::config::{GetMode, RangeErrorPolicy, UnsupportedMethodPolicy};

/// Body returned when the `GET` query parameter is absent or zero.
pub const MISSING_PARAMETER_BODY: &str = "Error: Query Parameter name missing";

/// Prefix of the body returned for a malformed `POST` payload.
pub const INVALID_PAYLOAD_PREFIX: &str = "Error: Invalid JSON payload";

/// Body returned for unmapped methods under the reject policy.
pub const METHOD_NOT_ALLOWED_BODY: &str = "Error: Method Not Allowed";

/// Routes one request to its handler and builds the response.
#[derive(Debug, Clone, Copy)]
pub struct RequestRouter {
    mode: GetMode,
    unsupported_method: UnsupportedMethodPolicy,
    range_error: RangeErrorPolicy,
}

impl RequestRouter {
    pub fn new(mode: GetMode) -> Self {
        Self {
            mode,
            unsupported_method: UnsupportedMethodPolicy::Passthrough,
            range_error: RangeErrorPolicy::Reject,
        }
    }

    pub fn with_unsupported_method(mut self, policy: UnsupportedMethodPolicy) -> Self {
        self.unsupported_method = policy;
        self
    }

    pub fn with_range_error(mut self, policy: RangeErrorPolicy) -> Self {
        self.range_error = policy;
        self
    }

    pub fn mode(&self) -> GetMode {
        self.mode
    }

    /// Handle one request. Always produces a response.
    ///
    /// Opens no span of its own; the caller owns the invocation span.
    pub fn handle(&self, request: &Request) -> Response {
        match request.method {
            Method::GET => match self.mode {
                GetMode::Fibonacci => self.handle_fibonacci(request),
                GetMode::Echo => Self::handle_echo(request),
            },
            Method::POST => Self::handle_payload(request),
            _ => self.handle_unsupported(request),
        }
    }

    fn handle_fibonacci(&self, request: &Request) -> Response {
        let n = request.query("number").map_or(0, parse_number);
        if n == 0 {
            tracing::debug!("number query parameter missing or not a positive integer");
            return Response::internal_error(MISSING_PARAMETER_BODY);
        }

        let value = match fibonacci(n) {
            Ok(value) => value,
            Err(e) => match self.range_error {
                RangeErrorPolicy::Reject => {
                    tracing::warn!(n, error = %e, "Fibonacci input out of range");
                    return Response::internal_error(format!("Error: {e}"));
                }
                RangeErrorPolicy::Swallow => {
                    tracing::warn!(n, error = %e, "Fibonacci input out of range, answering 0");
                    0
                }
            },
        };

        tracing::debug!(n, value, "Fibonacci computed");
        Response::ok(format!("Hey {value} welcome! "))
    }

    fn handle_echo(request: &Request) -> Response {
        match request.query("name") {
            Some(name) => Response::ok(format!("Hey {name} welcome! ")),
            None => {
                tracing::debug!("name query parameter missing");
                Response::internal_error(MISSING_PARAMETER_BODY)
            }
        }
    }

    fn handle_payload(request: &Request) -> Response {
        let body = String::from_utf8_lossy(&request.body);
        match validate(&request.body) {
            Ok(()) => Response::ok(body),
            Err(e) => {
                tracing::debug!(
                    line = e.line(),
                    column = e.column(),
                    error = %e,
                    "Rejected malformed JSON payload"
                );
                Response::internal_error(format!(
                    "{INVALID_PAYLOAD_PREFIX} ||| {e} Body Obtained||||{body}"
                ))
            }
        }
    }

    fn handle_unsupported(&self, request: &Request) -> Response {
        match self.unsupported_method {
            UnsupportedMethodPolicy::Passthrough => {
                tracing::debug!(method = %request.method, "No route for method, returning empty response");
                Response::default()
            }
            UnsupportedMethodPolicy::Reject => Response::new(405, METHOD_NOT_ALLOWED_BODY),
        }
    }
}

/// Parse a base-10 `u32`; anything unparseable counts as zero.
fn parse_number(value: &str) -> u32 {
    if value.starts_with('+') {
        return 0;
    }
    value.parse().unwrap_or(0)
}
