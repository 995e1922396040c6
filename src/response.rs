//! Response model and the typed error-body contract.
//!
//! The transport collects the full response body before routing, so callbacks
//! receive an owned, cloneable [`HttpResponse`] rather than a live stream.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;

/// An HTTP response as delivered to lifecycle and classification callbacks.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code of the response.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, parsed as JSON when possible.
    ///
    /// Non-JSON bodies are carried as `Value::String`; empty bodies as
    /// `Value::Null`.
    pub body: Value,
}

/// Expected shape of an error response body.
///
/// Servers in this contract report failures as `{"error": <payload>}`. The
/// field is optional so bodies that deviate from the contract still parse.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<Value>,
}

impl HttpResponse {
    /// Builds a response from collected wire parts.
    #[must_use]
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: &[u8]) -> Self {
        Self {
            status,
            headers,
            body: parse_body(body),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Extracts the error payload handed to `on_error`.
    ///
    /// Returns the body's `error` field when present. When the field is
    /// absent or the body is not an object, falls back to the whole body
    /// value so the caller still sees what the server sent.
    #[must_use]
    pub fn error_payload(&self) -> Value {
        let parsed: Option<ErrorBody> = serde_json::from_value(self.body.clone()).ok();
        match parsed.and_then(|body| body.error) {
            Some(payload) => payload,
            None => self.body.clone(),
        }
    }
}

fn parse_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
