//! Shared domain types: the upstream request descriptor and the response
//! envelope every route must honor identically.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully resolved outbound request: URL plus the headers the upstream
/// requires. Built by the route table, consumed by the fetcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Absolute URL to GET.
    pub url: String,
    /// Extra request headers (name, value).
    pub headers: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    /// Creates a request with no extra headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Adds a header to the request.
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// The uniform response wrapper.
///
/// Serializes to `{"success": true, "data": ...}` or
/// `{"success": false, "error": "..."}`; `success` is always present and
/// `data`/`error` never appear together.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    /// Whether the request produced a payload.
    pub success: bool,
    /// Opaque upstream payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Human-readable failure description, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Successful envelope wrapping an opaque payload.
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope carrying a human-readable error string.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
