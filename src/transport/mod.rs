//! HTTP transport seam.
//!
//! The dispatcher never talks to an HTTP client directly; it issues a
//! [`WireRequest`] through a [`Transport`] trait object injected at
//! construction. This keeps the routing logic free of transport concerns
//! and lets tests substitute a canned transport for a real network stack.
//!
//! The seam also encodes the failure taxonomy: `issue` returns `Ok` for
//! every HTTP response the server produced, whatever the status, and `Err`
//! only when no response exists (DNS, refused connection, timeout, bad URL).

mod client;

pub use client::ReqwestTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::DispatchError;
use crate::hooks::ProgressSinks;
use crate::response::HttpResponse;

/// A fully composed wire-level request, ready for a transport to send.
#[derive(Debug, Clone)]
pub struct WireRequest {
    /// HTTP method.
    pub method: reqwest::Method,
    /// Resolved target URL (possibly empty or malformed; the transport
    /// reports that as a no-response failure).
    pub url: String,
    /// Outgoing headers, already composed per the active header style.
    pub headers: HeaderMap,
    /// JSON text body, when the dispatch carries one.
    pub body: Option<String>,
}

/// The external HTTP capability the dispatcher depends on.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues the request, forwarding transfer progress to the given sinks.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] only for no-response failures. Responses
    /// with error statuses are `Ok`.
    async fn issue(
        &self,
        request: WireRequest,
        progress: ProgressSinks,
    ) -> Result<HttpResponse, DispatchError>;
}
