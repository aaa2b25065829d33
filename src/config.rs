//! Configuration parsing for the function.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variables (the usual way a function is configured)
//! - Defaults for everything except the trace export target

use clap::{Parser, ValueEnum};

use crate::handler::RequestRouter;
use crate::observability::telemetry::TelemetryConfig;

/// How `GET` requests are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GetMode {
    /// Greet the `name` query parameter.
    Echo,
    /// Compute the Fibonacci number of the `number` query parameter.
    Fibonacci,
}

impl GetMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GetMode::Echo => "echo",
            GetMode::Fibonacci => "fibonacci",
        }
    }
}

/// What to do with methods other than `GET` and `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnsupportedMethodPolicy {
    /// Return the empty response (status 0, empty body).
    Passthrough,
    /// Return 405 Method Not Allowed.
    Reject,
}

/// What to do when the Fibonacci number is too large for a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangeErrorPolicy {
    /// Answer with a 500 carrying the range error message.
    Reject,
    /// Ignore the error and answer 200 with a value of 0.
    Swallow,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Fibonacci Lambda: a traced API-gateway function.
#[derive(Parser, Debug, Clone)]
#[command(name = "fibonacci-lambda")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// OTLP collector host (scheme optional, https assumed)
    #[arg(long, env = "URL")]
    pub otlp_endpoint: String,

    /// URL path appended to the collector host
    #[arg(long, env = "URL_PATH", default_value = "/v1/traces")]
    pub otlp_url_path: String,

    /// API token sent as `Authorization: Api-Token <token>`
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// How GET requests are answered
    #[arg(long, env = "HANDLER_MODE", value_enum, default_value_t = GetMode::Fibonacci)]
    pub mode: GetMode,

    /// Handling of methods other than GET and POST
    #[arg(
        long,
        env = "UNSUPPORTED_METHOD",
        value_enum,
        default_value_t = UnsupportedMethodPolicy::Passthrough
    )]
    pub unsupported_method: UnsupportedMethodPolicy,

    /// Handling of Fibonacci inputs above 93
    #[arg(long, env = "RANGE_ERROR", value_enum, default_value_t = RangeErrorPolicy::Reject)]
    pub range_error: RangeErrorPolicy,

    /// Service name reported on every span
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "fibonacci-lambda")]
    pub service_name: String,

    /// Service version reported on every span
    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub service_version: String,

    /// Function name, used as the invocation span name
    #[arg(long, env = "AWS_LAMBDA_FUNCTION_NAME", default_value = "fibonacci-lambda")]
    pub function_name: String,

    /// Export the invocation span before answering, instead of in batches
    #[arg(long, env = "FLUSH_PER_INVOCATION")]
    pub flush_per_invocation: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the request router described by this configuration.
    pub fn router(&self) -> RequestRouter {
        RequestRouter::new(self.mode)
            .with_unsupported_method(self.unsupported_method)
            .with_range_error(self.range_error)
    }

    /// Extract the trace export settings.
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            endpoint: self.otlp_endpoint.clone(),
            url_path: self.otlp_url_path.clone(),
            api_token: self.api_token.clone(),
            service_name: self.service_name.clone(),
            service_version: self.service_version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let mut argv = vec!["fibonacci-lambda"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[
            "--otlp-endpoint",
            "collector.example.com",
            "--api-token",
            "secret",
        ])
        .expect("minimal args should parse");

        assert_eq!(config.mode, GetMode::Fibonacci);
        assert_eq!(config.unsupported_method, UnsupportedMethodPolicy::Passthrough);
        assert_eq!(config.range_error, RangeErrorPolicy::Reject);
        assert_eq!(config.otlp_url_path, "/v1/traces");
        assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.flush_per_invocation);
    }

    #[test]
    fn test_flush_per_invocation_flag() {
        let config = parse(&[
            "--otlp-endpoint",
            "collector.example.com",
            "--api-token",
            "secret",
            "--flush-per-invocation",
        ])
        .expect("args should parse");

        assert!(config.flush_per_invocation);
    }

    #[test]
    fn test_value_enums() {
        let config = parse(&[
            "--otlp-endpoint",
            "collector.example.com",
            "--api-token",
            "secret",
            "--mode",
            "echo",
            "--unsupported-method",
            "reject",
            "--range-error",
            "swallow",
            "--log-format",
            "json",
        ])
        .expect("args should parse");

        assert_eq!(config.mode, GetMode::Echo);
        assert_eq!(config.unsupported_method, UnsupportedMethodPolicy::Reject);
        assert_eq!(config.range_error, RangeErrorPolicy::Swallow);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.router().mode(), GetMode::Echo);
    }

    #[test]
    fn test_telemetry_settings_are_copied() {
        let config = parse(&[
            "--otlp-endpoint",
            "collector.example.com",
            "--otlp-url-path",
            "/api/v2/otlp/v1/traces",
            "--api-token",
            "secret",
            "--service-name",
            "quickstart",
        ])
        .expect("args should parse");

        let telemetry = config.telemetry();
        assert_eq!(telemetry.endpoint, "collector.example.com");
        assert_eq!(telemetry.url_path, "/api/v2/otlp/v1/traces");
        assert_eq!(telemetry.api_token, "secret");
        assert_eq!(telemetry.service_name, "quickstart");
    }
}
