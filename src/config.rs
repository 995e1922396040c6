//! Declarative request description: method, URL composition, header style,
//! body, cancellation signal, and the callback set for one dispatch.
//!
//! The two header-composition styles (a bare bearer-token string vs. a
//! caller-supplied header collection) are a single tagged [`HeaderStyle`],
//! selected by which builder setter the caller uses. Everything else about
//! the dispatch flow is shared between them.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::warn;

use crate::error::DispatchError;
use crate::hooks::{
    ErrorHook, FaultHook, FinishHook, ProgressEvent, ProgressHook, ResponseHook, StartHook,
};
use crate::response::HttpResponse;

/// HTTP methods supported by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Converts to the transport-level method type.
    #[must_use]
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// How outgoing headers are composed for a dispatch.
///
/// `Accept: application/json` is set regardless of style.
#[derive(Debug, Clone)]
pub enum HeaderStyle {
    /// Bearer-token style: `Content-Type: application/json` for every method
    /// except GET, and `Authorization` set verbatim when supplied.
    Bearer {
        /// Raw `Authorization` header value, sent verbatim.
        authorization: Option<String>,
    },
    /// Generic style: the supplied collection is copied into the outgoing
    /// headers unchanged; no implicit `Content-Type`.
    Generic {
        /// Caller-supplied headers, forwarded as-is.
        headers: HeaderMap,
    },
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self::Bearer {
            authorization: None,
        }
    }
}

/// One dispatch invocation: request description plus callback set.
///
/// Built with consuming setters and handed to
/// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch). Nothing in a
/// config outlives the dispatch it describes.
pub struct RequestConfig {
    pub(crate) method: Method,
    pub(crate) base_url: Option<String>,
    pub(crate) end_point: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) body: Option<Value>,
    pub(crate) header_style: HeaderStyle,
    pub(crate) signal: Option<oneshot::Receiver<()>>,
    pub(crate) on_start: Option<StartHook>,
    pub(crate) on_success: Option<ResponseHook>,
    pub(crate) on_error: Option<ErrorHook>,
    pub(crate) on_finish: Option<FinishHook>,
    pub(crate) on_server_error: Option<ResponseHook>,
    pub(crate) on_unauthenticated: Option<ResponseHook>,
    pub(crate) on_forbidden: Option<ResponseHook>,
    pub(crate) on_upload_progress: Option<ProgressHook>,
    pub(crate) on_download_progress: Option<ProgressHook>,
    pub(crate) on_fault: Option<FaultHook>,
}

impl RequestConfig {
    /// Creates a config for the given method with no URL, body, or hooks.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            base_url: None,
            end_point: None,
            url: None,
            body: None,
            header_style: HeaderStyle::default(),
            signal: None,
            on_start: None,
            on_success: None,
            on_error: None,
            on_finish: None,
            on_server_error: None,
            on_unauthenticated: None,
            on_forbidden: None,
            on_upload_progress: None,
            on_download_progress: None,
            on_fault: None,
        }
    }

    /// Overrides the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the base URL, prepended to the end point when no full `url` is set.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the end point, appended to the base URL when no full `url` is set.
    #[must_use]
    pub fn end_point(mut self, end_point: impl Into<String>) -> Self {
        self.end_point = Some(end_point.into());
        self
    }

    /// Sets the full target URL, taking precedence over base URL + end point.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the request body, serialized to JSON text on dispatch.
    ///
    /// The body is serialized uniformly for every method, including GET.
    /// Most servers ignore GET bodies; the behavior is kept for
    /// compatibility with the API this dispatcher fronts.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a verbatim `Authorization` header value (bearer style).
    #[must_use]
    pub fn authorization(mut self, authorization: impl Into<String>) -> Self {
        self.header_style = HeaderStyle::Bearer {
            authorization: Some(authorization.into()),
        };
        self
    }

    /// Supplies a generic header collection, switching to generic style.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.header_style = HeaderStyle::Generic { headers };
        self
    }

    /// Attaches a cancellation signal.
    ///
    /// When the sender side fires, the dispatch is aborted and the fault
    /// path runs with [`DispatchError::Aborted`]. Dropping the sender
    /// without firing is not a cancellation.
    #[must_use]
    pub fn signal(mut self, signal: oneshot::Receiver<()>) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Invoked synchronously before the request is issued.
    #[must_use]
    pub fn on_start(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    /// Invoked with the response when the status is 2xx.
    #[must_use]
    pub fn on_success(mut self, hook: impl FnOnce(HttpResponse) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    /// Invoked on any non-2xx response with the extracted error payload
    /// (see [`HttpResponse::error_payload`]) and the full response.
    #[must_use]
    pub fn on_error(mut self, hook: impl FnOnce(Value, HttpResponse) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Invoked exactly once after the terminal branch, on every path.
    #[must_use]
    pub fn on_finish(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_finish = Some(Box::new(hook));
        self
    }

    /// Invoked in addition to `on_error` when the status is 500.
    #[must_use]
    pub fn on_server_error(mut self, hook: impl FnOnce(HttpResponse) + Send + 'static) -> Self {
        self.on_server_error = Some(Box::new(hook));
        self
    }

    /// Invoked in addition to `on_error` when the status is 401.
    #[must_use]
    pub fn on_unauthenticated(mut self, hook: impl FnOnce(HttpResponse) + Send + 'static) -> Self {
        self.on_unauthenticated = Some(Box::new(hook));
        self
    }

    /// Invoked in addition to `on_error` when the status is 403.
    #[must_use]
    pub fn on_forbidden(mut self, hook: impl FnOnce(HttpResponse) + Send + 'static) -> Self {
        self.on_forbidden = Some(Box::new(hook));
        self
    }

    /// Invoked zero or more times with request-body upload progress.
    #[must_use]
    pub fn on_upload_progress(
        mut self,
        hook: impl Fn(ProgressEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_upload_progress = Some(std::sync::Arc::new(hook));
        self
    }

    /// Invoked zero or more times with response-body download progress.
    #[must_use]
    pub fn on_download_progress(
        mut self,
        hook: impl Fn(ProgressEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_download_progress = Some(std::sync::Arc::new(hook));
        self
    }

    /// Invoked with a no-response failure (network, timeout, abort).
    ///
    /// When absent, such failures go to the dispatcher's fault hook, which
    /// logs them at error level by default. This is the observable channel
    /// for failures the callback set cannot intercept.
    #[must_use]
    pub fn on_fault(mut self, hook: impl FnOnce(DispatchError) + Send + 'static) -> Self {
        self.on_fault = Some(Box::new(hook));
        self
    }

    /// Resolves the effective target URL.
    ///
    /// `url` wins when present; otherwise base URL and end point are
    /// concatenated, with missing parts treated as empty. An empty result is
    /// still attempted and fails at the transport without a response.
    pub(crate) fn resolve_target_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let base = self.base_url.as_deref().unwrap_or("");
        let end_point = self.end_point.as_deref().unwrap_or("");
        format!("{base}{end_point}")
    }

    /// Builds the outgoing header set per the active [`HeaderStyle`].
    pub(crate) fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        match &self.header_style {
            HeaderStyle::Bearer { authorization } => {
                if self.method != Method::Get {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                if let Some(token) = authorization {
                    match HeaderValue::from_str(token) {
                        Ok(value) => {
                            headers.insert(AUTHORIZATION, value);
                        }
                        Err(_) => warn!(
                            "authorization value is not a valid header value; header not sent"
                        ),
                    }
                }
            }
            HeaderStyle::Generic { headers: supplied } => {
                for (name, value) in supplied {
                    headers.insert(name.clone(), value.clone());
                }
            }
        }
        headers
    }
}
