//! Caller-supplied callback types for dispatch lifecycle, classification,
//! progress, and fault reporting.
//!
//! Lifecycle and classification hooks are `FnOnce` (each fires at most once
//! per dispatch); progress hooks are `Fn` behind an `Arc` because the
//! transport may report many events and the upload sink crosses into the
//! request body stream.

use std::sync::Arc;

use serde_json::Value;

use crate::error::DispatchError;
use crate::response::HttpResponse;

/// Hook invoked synchronously before the request is issued.
pub type StartHook = Box<dyn FnOnce() + Send>;

/// Hook invoked with the response on a given outcome path.
pub type ResponseHook = Box<dyn FnOnce(HttpResponse) + Send>;

/// Hook invoked with the extracted error payload and the full response.
pub type ErrorHook = Box<dyn FnOnce(Value, HttpResponse) + Send>;

/// Hook invoked exactly once after the terminal branch, on every path.
pub type FinishHook = Box<dyn FnOnce() + Send>;

/// Hook invoked with a no-response failure (network, timeout, abort).
pub type FaultHook = Box<dyn FnOnce(DispatchError) + Send>;

/// Hook invoked zero or more times with transfer progress.
pub type ProgressHook = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// A single transfer progress report, forwarded from the transport unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Cumulative bytes transferred so far.
    pub bytes: u64,
    /// Expected total bytes, when the transport knows it.
    pub total: Option<u64>,
}

/// Progress sinks handed to the transport for one dispatch.
#[derive(Clone, Default)]
pub struct ProgressSinks {
    /// Sink for request-body upload progress.
    pub upload: Option<ProgressHook>,
    /// Sink for response-body download progress.
    pub download: Option<ProgressHook>,
}

impl ProgressSinks {
    /// Reports a download progress event if a download sink is attached.
    pub fn report_download(&self, event: ProgressEvent) {
        if let Some(sink) = self.download.as_ref() {
            sink(event);
        }
    }
}
