//! API gateway proxy event wire types.
//!
//! Only the fields the handler reads are modelled; everything else in the
//! gateway payload is ignored on deserialization.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::Method;
use serde::{Deserialize, Deserializer, Serialize};

use super::request::{Request, Response};

/// Incoming REST API proxy event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyRequest {
    #[serde(default = "unknown_method", deserialize_with = "deserialize_method")]
    pub http_method: Method,
    #[serde(default, deserialize_with = "nullable_map")]
    pub query_string_parameters: HashMap<String, String>,
    #[serde(default, deserialize_with = "nullable_map")]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

/// The part of the gateway request context the handler uses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Outgoing REST API proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Method token used when the event carries no usable method.
///
/// Never matches a route, so such events get the unmapped-method response.
pub const UNKNOWN_METHOD: &str = "_OTHER";

fn unknown_method() -> Method {
    Method::from_bytes(UNKNOWN_METHOD.as_bytes()).expect("_OTHER is a valid method token")
}

/// Keep the token exactly as sent; missing, null, empty or malformed tokens
/// become [`UNKNOWN_METHOD`].
fn deserialize_method<'de, D>(deserializer: D) -> Result<Method, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(Method::from_bytes(raw.as_bytes()).unwrap_or_else(|_| {
        tracing::debug!(method = %raw, "Unusable HTTP method in event");
        unknown_method()
    }))
}

/// A null map is empty; null values inside it are dropped.
fn nullable_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<HashMap<String, Option<String>>>::deserialize(deserializer)?;
    Ok(map
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect())
}

impl From<ApiGatewayProxyRequest> for Request {
    fn from(event: ApiGatewayProxyRequest) -> Self {
        let body = match event.body {
            Some(body) if event.is_base64_encoded => match STANDARD.decode(body.as_bytes()) {
                Ok(decoded) => decoded,
                Err(e) => {
                    tracing::warn!(error = %e, "Body flagged as base64 but not decodable, using raw bytes");
                    body.into_bytes()
                }
            },
            Some(body) => body.into_bytes(),
            None => Vec::new(),
        };

        Self {
            method: event.http_method,
            query_parameters: event.query_string_parameters,
            headers: event
                .headers
                .into_iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value))
                .collect(),
            body,
            request_id: event.request_context.and_then(|context| context.request_id),
        }
    }
}

impl ApiGatewayProxyResponse {
    /// Wrap a handler response. Echoed `POST` payloads are labelled as JSON.
    pub fn from_response(response: Response, method: &Method) -> Self {
        let content_type = if *method == Method::POST && response.status_code == 200 {
            "application/json"
        } else {
            "text/plain; charset=utf-8"
        };

        Self {
            status_code: response.status_code,
            headers: HashMap::from([("Content-Type".to_string(), content_type.to_string())]),
            body: response.body,
            is_base64_encoded: false,
        }
    }
}
