//! The uniform outcome record for one probe invocation.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// Upper bound on retained raw response text, in characters.
pub const MAX_RAW_RESPONSE_CHARS: usize = 2000;

/// Upper bound on retained transport error detail, in characters.
const MAX_ERROR_SNIPPET_CHARS: usize = 500;

/// Status code recorded when the failure preceded any HTTP response.
pub const STATUS_NO_RESPONSE: u16 = 0;

/// Status code convention recorded for a client-side timeout.
pub const STATUS_TIMEOUT: u16 = 408;

/// Outcome of one probe invocation.
///
/// Every outcome — an HTTP response of any status, a timeout, a refused
/// connection, a decode fault — resolves to one of these records. The
/// `success` flag is informational only; downstream interpretation and schema
/// validation run regardless of it.
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    /// True when the HTTP status fell in [200, 300).
    pub success: bool,
    /// HTTP status code; [`STATUS_NO_RESPONSE`] before any response arrived.
    pub status_code: u16,
    /// Elapsed time in milliseconds, rounded to 2 decimals on a response;
    /// 0 on connection/generic failures; the configured timeout on timeouts.
    pub latency_ms: f64,
    /// Body parsed as JSON, when it parsed. A non-JSON body leaves this
    /// absent without failing the probe.
    pub response_body: Option<Value>,
    /// Human-readable failure description; empty when the request produced a
    /// response.
    pub error_message: String,
    /// Raw body text, truncated to [`MAX_RAW_RESPONSE_CHARS`] characters.
    pub raw_response: String,
}

impl TestReport {
    /// Builds the report for a received HTTP response.
    pub fn from_http(status: u16, latency: Duration, body_text: &str) -> Self {
        TestReport {
            success: (200..300).contains(&status),
            status_code: status,
            latency_ms: round2(latency.as_secs_f64() * 1000.0),
            response_body: serde_json::from_str::<Value>(body_text).ok(),
            error_message: String::new(),
            raw_response: truncate_chars(body_text, MAX_RAW_RESPONSE_CHARS),
        }
    }

    /// Report for a request that exceeded the configured timeout.
    ///
    /// Latency is pinned to the full timeout, since that is how long the
    /// caller actually waited.
    pub fn timed_out(timeout: Duration) -> Self {
        TestReport {
            success: false,
            status_code: STATUS_TIMEOUT,
            latency_ms: timeout.as_secs_f64() * 1000.0,
            response_body: None,
            error_message: format!("Request timed out after {} seconds", timeout.as_secs()),
            raw_response: String::new(),
        }
    }

    /// Report for a connection that could not be established (DNS failure,
    /// unreachable host, refused connection).
    pub fn connection_failed(detail: &str) -> Self {
        TestReport {
            success: false,
            status_code: STATUS_NO_RESPONSE,
            latency_ms: 0.0,
            response_body: None,
            error_message:
                "Connection failed: unable to reach the endpoint; check that the URL is correct"
                    .to_string(),
            raw_response: truncate_chars(detail, MAX_ERROR_SNIPPET_CHARS),
        }
    }

    /// Report for a transport fault that is neither a timeout nor a
    /// connection failure.
    pub fn request_failed(detail: &str) -> Self {
        TestReport {
            success: false,
            status_code: STATUS_NO_RESPONSE,
            latency_ms: 0.0,
            response_body: None,
            error_message: format!("Request failed: {detail}"),
            raw_response: String::new(),
        }
    }

    /// Report for a fault outside the transport layer entirely.
    pub fn unexpected(detail: &str) -> Self {
        TestReport {
            success: false,
            status_code: STATUS_NO_RESPONSE,
            latency_ms: 0.0,
            response_body: None,
            error_message: format!("Unexpected error: {detail}"),
            raw_response: String::new(),
        }
    }

    /// Object view of the parsed body, for schema validation.
    ///
    /// Returns `None` when no body parsed or when it parsed to something
    /// other than a JSON object (arrays and scalars carry no fields to
    /// check).
    pub fn response_object(&self) -> Option<&Map<String, Value>> {
        self.response_body.as_ref().and_then(Value::as_object)
    }

    /// Latency rendered for display.
    pub fn latency_display(&self) -> String {
        format_latency(self.latency_ms)
    }
}

/// Formats a millisecond latency: sub-second values as whole milliseconds,
/// anything slower in seconds with 2 decimals.
pub fn format_latency(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{ms:.0} ms")
    } else {
        format!("{:.2} s", ms / 1000.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
