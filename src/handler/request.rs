//! Invocation request and response.

use std::collections::HashMap;

use http::Method;

/// One incoming request, as handed over by the function runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub query_parameters: HashMap<String, String>,
    /// Header names are stored lowercase.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    /// Gateway-assigned request id, when the runtime provides one.
    pub request_id: Option<String>,
}

impl Request {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query_parameters: HashMap::new(),
            headers: HashMap::new(),
            body: Vec::new(),
            request_id: None,
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Look up a query parameter, treating an empty value as absent.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// The single response produced for a request.
///
/// The default value (status 0, empty body) is what unmapped methods get
/// under the passthrough policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Self::new(500, body)
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code >= 500
    }
}
