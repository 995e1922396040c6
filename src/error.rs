//! Error types for the dispatch module.
//!
//! Only no-response failures are errors here. HTTP responses with error
//! statuses (4xx/5xx) are not represented as `DispatchError` values; they
//! are routed to the caller's error/classification callbacks instead.

use thiserror::Error;

/// Failures where the transport never produced a server response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error dispatching to {url}: {source}")]
    Network {
        /// The URL the request was issued against.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before a response arrived.
    #[error("timeout dispatching to {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The caller's cancellation signal fired before the transport settled.
    #[error("request to {url} aborted by caller")]
    Aborted {
        /// The URL of the aborted request.
        url: String,
    },

    /// The resolved target URL is malformed or empty.
    #[error("invalid URL: {url:?}")]
    InvalidUrl {
        /// The invalid URL string (possibly empty when neither `url` nor
        /// `base_url`/`end_point` were supplied).
        url: String,
    },
}

impl DispatchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an abort error.
    pub fn aborted(url: impl Into<String>) -> Self {
        Self::Aborted { url: url.into() }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` because the
// variants require the target URL for context, which the source error does
// not reliably carry. The helper constructors are the intended entry points.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_error_timeout_display() {
        let error = DispatchError::timeout("https://api.example.com/users");
        let msg = error.to_string();
        assert!(msg.contains("timeout"), "Expected 'timeout' in: {msg}");
        assert!(
            msg.contains("https://api.example.com/users"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_dispatch_error_aborted_display() {
        let error = DispatchError::aborted("https://api.example.com/users");
        let msg = error.to_string();
        assert!(msg.contains("aborted"), "Expected 'aborted' in: {msg}");
    }

    #[test]
    fn test_dispatch_error_invalid_url_display_includes_empty_url() {
        let error = DispatchError::invalid_url("");
        let msg = error.to_string();
        assert!(
            msg.contains("invalid URL"),
            "Expected 'invalid URL' in: {msg}"
        );
        assert!(msg.contains("\"\""), "Expected quoted empty URL in: {msg}");
    }
}
