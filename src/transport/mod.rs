//! HTTP transport layer for the probe.
//!
//! Provides the transport abstraction one probe dispatch goes through and the
//! `reqwest`-backed implementation. Failures are classified into the three
//! cases the report layer distinguishes: connection establishment, timeout,
//! and everything else.

mod http;

pub use http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established at all — DNS failure,
    /// refused connection, unreachable host.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// No response arrived within the configured bound.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Any other transport-level failure.
    #[error("Request error: {message}")]
    Request {
        /// Error message.
        message: String,
    },
}
