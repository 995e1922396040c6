//! Fetchkit Core Library
//!
//! A unified HTTP request dispatcher: one operation that takes a declarative
//! request description (method, URL composition, headers, body, cancellation
//! signal, progress hooks) plus a set of lifecycle callbacks, issues a single
//! request through an injected transport, and routes the outcome to exactly
//! one matching callback, with additive status-code classification
//! (500/401/403) on the error-response path.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`dispatch`] - The dispatcher: request composition, outcome routing
//! - [`config`] - Declarative request description and header-style rules
//! - [`transport`] - Transport seam and the default reqwest implementation
//! - [`response`] - Response model and the typed error-body contract
//! - [`hooks`] - Lifecycle, classification, progress, and fault callbacks
//!
//! Server-response failures are fully recovered into callback invocations;
//! no-response failures (DNS, refused, timeout, abort) never reach the
//! callback set and surface through a fault channel instead, so silent
//! network failures are impossible.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod hooks;
pub mod response;
pub mod transport;

// Re-export commonly used types
pub use config::{HeaderStyle, Method, RequestConfig};
pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use hooks::{ProgressEvent, ProgressSinks};
pub use response::HttpResponse;
pub use transport::{ReqwestTransport, Transport, WireRequest};
