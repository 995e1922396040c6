//! Default transport on `reqwest`.
//!
//! Centralizes client construction policy (timeouts, user-agent, gzip) and
//! implements progress reporting: upload progress by sending the body as a
//! chunked stream, download progress by streaming the response body.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Url};
use tracing::debug;

use super::{Transport, WireRequest};
use crate::error::DispatchError;
use crate::hooks::{ProgressEvent, ProgressHook, ProgressSinks};
use crate::response::HttpResponse;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Upload chunk size; small enough to produce several progress events for
/// form-sized bodies without fragmenting the wire write path.
const UPLOAD_CHUNK_BYTES: usize = 16 * 1024;

const USER_AGENT: &str = concat!("fetchkit/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] implementation backed by a pooled `reqwest` client.
///
/// Designed to be created once and shared across dispatches, taking
/// advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Creates a transport with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 10 seconds
    /// - Read timeout: 30 seconds
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a transport with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Creates a transport from a caller-configured client.
    ///
    /// Use this when the embedding application already owns a `reqwest`
    /// client with its own proxy/TLS/timeout policy.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn issue(
        &self,
        request: WireRequest,
        progress: ProgressSinks,
    ) -> Result<HttpResponse, DispatchError> {
        let url = Url::parse(&request.url)
            .map_err(|_| DispatchError::invalid_url(request.url.clone()))?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = match progress.upload.as_ref() {
                Some(sink) => builder.body(chunked_upload_body(body, sink.clone())),
                None => builder.body(body),
            };
        }

        let response = builder
            .send()
            .await
            .map_err(|error| classify_reqwest_error(&request.url, error))?;

        let status = response.status();
        let headers = response.headers().clone();
        let total = response.content_length();
        debug!(status = status.as_u16(), url = %request.url, "response headers received");

        // Collect the body chunk by chunk so download progress can be
        // reported as it arrives. A failure mid-body means the response was
        // never fully produced, so it stays on the no-response path.
        let mut collected: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|error| classify_reqwest_error(&request.url, error))?;
            collected.extend_from_slice(&chunk);
            progress.report_download(ProgressEvent {
                bytes: saturating_u64(collected.len()),
                total,
            });
        }

        Ok(HttpResponse::from_parts(status, headers, &collected))
    }
}

/// Wraps a JSON text body in a chunked stream that reports cumulative
/// upload progress as chunks are pulled onto the wire.
fn chunked_upload_body(body: String, sink: ProgressHook) -> reqwest::Body {
    let total = saturating_u64(body.len());
    let bytes = body.into_bytes();
    let chunks: Vec<Vec<u8>> = bytes
        .chunks(UPLOAD_CHUNK_BYTES)
        .map(<[u8]>::to_vec)
        .collect();
    let mut sent: u64 = 0;
    let stream = futures_util::stream::iter(chunks.into_iter().map(move |chunk| {
        sent = sent.saturating_add(saturating_u64(chunk.len()));
        sink(ProgressEvent {
            bytes: sent,
            total: Some(total),
        });
        Ok::<Vec<u8>, std::convert::Infallible>(chunk)
    }));
    reqwest::Body::wrap_stream(stream)
}

fn classify_reqwest_error(url: &str, error: reqwest::Error) -> DispatchError {
    if error.is_timeout() {
        DispatchError::timeout(url)
    } else {
        DispatchError::network(url, error)
    }
}

fn saturating_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    fn wire_request(url: &str) -> WireRequest {
        WireRequest {
            method: reqwest::Method::GET,
            url: url.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_issue_with_empty_url_fails_without_response() {
        let transport = ReqwestTransport::new();
        let result = transport.issue(wire_request(""), ProgressSinks::default()).await;
        assert!(matches!(result, Err(DispatchError::InvalidUrl { url }) if url.is_empty()));
    }

    #[tokio::test]
    async fn test_issue_with_relative_url_fails_without_response() {
        let transport = ReqwestTransport::new();
        let result = transport
            .issue(wire_request("/users"), ProgressSinks::default())
            .await;
        assert!(matches!(result, Err(DispatchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_transport_construction_with_custom_timeouts() {
        let _transport = ReqwestTransport::new_with_timeouts(1, 2);
    }
}
