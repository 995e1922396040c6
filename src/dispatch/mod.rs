//! Request dispatch and callback routing.
//!
//! [`Dispatcher`] is the single decision-making component of this crate: it
//! composes the wire request from a [`RequestConfig`], issues it through the
//! injected [`Transport`], and routes the outcome to exactly one matching
//! lifecycle callback, plus additive status-code classification callbacks
//! (500/401/403) on the error-response path.
//!
//! # Example
//!
//! ```no_run
//! use fetchkit::{Dispatcher, Method, RequestConfig};
//!
//! # fn example() {
//! let dispatcher = Dispatcher::new();
//! dispatcher.dispatch(
//!     RequestConfig::new(Method::Post)
//!         .base_url("https://api.x.io")
//!         .end_point("/users")
//!         .body(serde_json::json!({"name": "ada"}))
//!         .on_success(|res| println!("created: {}", res.body))
//!         .on_error(|payload, _res| eprintln!("rejected: {payload}"))
//!         .on_finish(|| println!("settled")),
//! );
//! # }
//! ```

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::{Method, RequestConfig};
use crate::error::DispatchError;
use crate::hooks::ProgressSinks;
use crate::response::HttpResponse;
use crate::transport::{ReqwestTransport, Transport, WireRequest};

/// Issues declarative HTTP requests and routes outcomes to callbacks.
///
/// Holds no per-request state; a single dispatcher is safe to share across
/// any number of concurrent dispatches. Cloning is cheap (shared transport).
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    fault_hook: Arc<dyn Fn(DispatchError) + Send + Sync>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Creates a dispatcher on the default [`ReqwestTransport`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new()))
    }

    /// Creates a dispatcher on an explicit transport.
    ///
    /// This is the seam for test doubles and for embedding applications
    /// that own their HTTP client configuration.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            fault_hook: Arc::new(default_fault_hook),
        }
    }

    /// Replaces the dispatcher-level fault hook.
    ///
    /// The hook receives no-response failures from dispatches whose config
    /// carries no `on_fault` callback. The default hook logs the failure at
    /// error level so network failures are never silent.
    #[must_use]
    pub fn fault_hook(mut self, hook: impl Fn(DispatchError) + Send + Sync + 'static) -> Self {
        self.fault_hook = Arc::new(hook);
        self
    }

    /// Issues one request and routes its outcome to the config's callbacks.
    ///
    /// Fire-and-forget: completion is observed only through the callbacks.
    /// `on_start` runs synchronously before this method returns; everything
    /// else runs on a spawned task. `on_finish` runs exactly once on every
    /// path, including no-response failures, before the fault channel fires.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime (the dispatch task is
    /// spawned on the ambient runtime).
    pub fn dispatch(&self, mut config: RequestConfig) {
        if let Some(on_start) = config.on_start.take() {
            on_start();
        }
        let request = WireRequest {
            method: config.method.as_reqwest(),
            url: config.resolve_target_url(),
            headers: config.build_headers(),
            body: config.body.take().map(|value| value.to_string()),
        };
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let transport = Arc::clone(&self.transport);
        let fault_hook = Arc::clone(&self.fault_hook);
        tokio::spawn(run_dispatch(transport, fault_hook, request, config));
    }

    /// Dispatches with the method fixed to GET.
    pub fn get(&self, config: RequestConfig) {
        self.dispatch(config.method(Method::Get));
    }

    /// Dispatches with the method fixed to POST.
    pub fn post(&self, config: RequestConfig) {
        self.dispatch(config.method(Method::Post));
    }

    /// Dispatches with the method fixed to PUT.
    pub fn put(&self, config: RequestConfig) {
        self.dispatch(config.method(Method::Put));
    }

    /// Dispatches with the method fixed to PATCH.
    pub fn patch(&self, config: RequestConfig) {
        self.dispatch(config.method(Method::Patch));
    }

    /// Dispatches with the method fixed to DELETE.
    pub fn delete(&self, config: RequestConfig) {
        self.dispatch(config.method(Method::Delete));
    }
}

fn default_fault_hook(error: DispatchError) {
    error!(error = %error, "dispatch failed without a server response");
}

/// Body of the spawned dispatch task: issue, race the abort signal, route.
async fn run_dispatch(
    transport: Arc<dyn Transport>,
    fault_hook: Arc<dyn Fn(DispatchError) + Send + Sync>,
    request: WireRequest,
    mut config: RequestConfig,
) {
    let url = request.url.clone();
    let progress = ProgressSinks {
        upload: config.on_upload_progress.take(),
        download: config.on_download_progress.take(),
    };

    let outcome = match config.signal.take() {
        Some(signal) => {
            let issue = transport.issue(request, progress);
            tokio::pin!(issue);
            tokio::select! {
                result = &mut issue => result,
                fired = signal => match fired {
                    Ok(()) => Err(DispatchError::aborted(url)),
                    // Dropped sender is not a cancellation; keep waiting.
                    Err(_) => issue.await,
                },
            }
        }
        None => transport.issue(request, progress).await,
    };

    route_outcome(outcome, config, fault_hook.as_ref());
}

/// Routes a settled transport outcome to the callback set.
///
/// Exactly one lifecycle branch runs; classification callbacks are additive
/// to `on_error`, never a replacement. `on_finish` runs on every path and
/// precedes the fault channel, mirroring the finally-before-rethrow order
/// of the API this dispatcher fronts.
fn route_outcome(
    outcome: Result<HttpResponse, DispatchError>,
    mut config: RequestConfig,
    fault_hook: &(dyn Fn(DispatchError) + Send + Sync),
) {
    let mut fault = None;
    match outcome {
        Ok(response) if response.is_success() => {
            if let Some(on_success) = config.on_success.take() {
                on_success(response);
            }
        }
        Ok(response) => {
            let classifier = match response.status.as_u16() {
                500 => config.on_server_error.take(),
                401 => config.on_unauthenticated.take(),
                403 => config.on_forbidden.take(),
                _ => None,
            };
            match (config.on_error.take(), classifier) {
                (Some(on_error), Some(classifier)) => {
                    on_error(response.error_payload(), response.clone());
                    classifier(response);
                }
                (Some(on_error), None) => on_error(response.error_payload(), response),
                (None, Some(classifier)) => classifier(response),
                (None, None) => {}
            }
        }
        Err(error) => fault = Some(error),
    }

    if let Some(on_finish) = config.on_finish.take() {
        on_finish();
    }
    if let Some(error) = fault {
        match config.on_fault.take() {
            Some(on_fault) => on_fault(error),
            None => fault_hook(error),
        }
    }
}
