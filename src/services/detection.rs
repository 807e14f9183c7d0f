//! Detection probe service.
//!
//! The core dispatch: builds the outbound payload and headers for one test,
//! POSTs once to the endpoint under test, and folds whatever happens —
//! response, timeout, refused connection, anything else — into a
//! [`TestReport`]. The send path is total: no failure mode escapes as an
//! error, so the presentation layer never needs fault handling for network
//! issues.

use http::header::{ACCEPT, CONTENT_TYPE};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

use crate::auth::AuthProvider;
use crate::observability::{redact, redact_headers};
use crate::transport::{HttpRequest, HttpTransport, TransportError};
use crate::types::{DetectionPayload, DetectionRequest, PayloadMetadata, TestReport};

/// Detection probe service.
///
/// Holds everything one test target needs: the transport, the credential
/// provider, the endpoint URL and the timeout. Immutable after construction;
/// build a fresh one per differing configuration.
pub struct DetectionService {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    endpoint_url: String,
    timeout: Duration,
}

impl DetectionService {
    /// Creates a new detection service.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
        endpoint_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            auth,
            endpoint_url: endpoint_url.into(),
            timeout,
        }
    }

    /// The endpoint this service probes.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Builds the outbound payload for `request`.
    ///
    /// The active audio variant serializes under its own key only; metadata
    /// is stamped fresh at call time.
    pub fn build_payload(&self, request: &DetectionRequest) -> DetectionPayload {
        DetectionPayload {
            language: request.language,
            audio: request.audio.clone(),
            metadata: PayloadMetadata::stamp(&request.message),
        }
    }

    /// Builds the request headers.
    ///
    /// Exactly three entries: content type, accept, and the one credential
    /// header the configured scheme applies.
    pub fn build_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            CONTENT_TYPE.as_str().to_string(),
            mime::APPLICATION_JSON.to_string(),
        );
        headers.insert(
            ACCEPT.as_str().to_string(),
            mime::APPLICATION_JSON.to_string(),
        );
        self.auth.apply_auth(&mut headers);
        headers
    }

    /// The outbound headers as safe to display: credential masked, the rest
    /// untouched.
    pub fn display_headers(&self) -> HashMap<String, String> {
        redact_headers(&self.build_headers())
    }

    /// Sends one probe and reports the outcome.
    ///
    /// Every path resolves to a well-formed [`TestReport`]: an HTTP answer of
    /// any status records status and latency, a timeout reports the dedicated
    /// 408 convention, a failed connection reports the 0 sentinel, and any
    /// other fault reports generically. This method never returns an error.
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint_url, scheme = %self.auth.scheme()))]
    pub async fn send(&self, request: &DetectionRequest) -> TestReport {
        let payload = self.build_payload(request);
        let headers = self.build_headers();

        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = %err, "payload serialization failed");
                return TestReport::unexpected(&format!("payload serialization failed: {err}"));
            }
        };

        let mut http_request = HttpRequest::post(&self.endpoint_url)
            .with_body(body)
            .with_timeout(self.timeout);
        for (name, value) in headers {
            http_request = http_request.with_header(name, value);
        }

        let started = Instant::now();
        match self.transport.send(http_request).await {
            Ok(response) => {
                let latency = started.elapsed();
                tracing::debug!(status = response.status, latency_ms = latency.as_millis() as u64, "endpoint answered");
                TestReport::from_http(response.status, latency, &response.text())
            }
            Err(TransportError::Timeout { timeout }) => {
                tracing::warn!(timeout_secs = timeout.as_secs(), "request timed out");
                TestReport::timed_out(timeout)
            }
            Err(TransportError::Connection { message }) => {
                tracing::warn!(detail = %redact(&message), "connection failed");
                TestReport::connection_failed(&message)
            }
            Err(TransportError::Request { message }) => {
                tracing::warn!(detail = %redact(&message), "request failed");
                TestReport::request_failed(&message)
            }
        }
    }
}

impl std::fmt::Debug for DetectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionService")
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout", &self.timeout)
            .field("scheme", &self.auth.scheme())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BearerAuth, HeaderKeyAuth, API_KEY_HEADER, AUTHORIZATION_HEADER};
    use crate::mocks::{fixtures, MockResponse, MockTransport};
    use crate::types::{AudioInput, Language, DEFAULT_MESSAGE, STATUS_TIMEOUT};

    fn service_with(transport: Arc<MockTransport>) -> DetectionService {
        DetectionService::new(
            transport,
            Arc::new(BearerAuth::from_string("judge_key_123")),
            "https://api.example.com/detect",
            Duration::from_secs(5),
        )
    }

    fn sample_request() -> DetectionRequest {
        DetectionRequest {
            audio: AudioInput::url("https://cdn.example.com/sample.mp3"),
            language: Language::En,
            message: String::new(),
        }
    }

    #[test]
    fn test_build_payload_single_audio_key() {
        let service = service_with(Arc::new(MockTransport::new()));

        let payload = service.build_payload(&sample_request());
        let value = serde_json::to_value(&payload).unwrap();

        assert!(value.get("audio_url").is_some());
        assert!(value.get("audio_base64").is_none());
        assert_eq!(value["language"], "en");
        assert_eq!(value["metadata"]["message"], DEFAULT_MESSAGE);

        let base64_payload = service.build_payload(&DetectionRequest {
            audio: AudioInput::base64("SUQzBAAAAAAA"),
            language: Language::Auto,
            message: "round 2".to_string(),
        });
        let value = serde_json::to_value(&base64_payload).unwrap();

        assert!(value.get("audio_base64").is_some());
        assert!(value.get("audio_url").is_none());
        assert_eq!(value["metadata"]["message"], "round 2");
    }

    #[test]
    fn test_build_headers_bearer() {
        let service = service_with(Arc::new(MockTransport::new()));

        let headers = service.build_headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            headers.get("accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            headers.get(AUTHORIZATION_HEADER).map(String::as_str),
            Some("Bearer judge_key_123")
        );
    }

    #[test]
    fn test_build_headers_raw_key() {
        let service = DetectionService::new(
            Arc::new(MockTransport::new()),
            Arc::new(HeaderKeyAuth::from_string("judge_key_123")),
            "https://api.example.com/detect",
            Duration::from_secs(5),
        );

        let headers = service.build_headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(
            headers.get(API_KEY_HEADER).map(String::as_str),
            Some("judge_key_123")
        );
        assert!(!headers.contains_key(AUTHORIZATION_HEADER));
    }

    #[test]
    fn test_display_headers_masks_the_credential() {
        let service = service_with(Arc::new(MockTransport::new()));

        let shown = service.display_headers();
        assert_eq!(shown.len(), 3);
        assert_eq!(
            shown.get(AUTHORIZATION_HEADER).map(String::as_str),
            Some("Bearer [HIDDEN]")
        );
        assert!(!format!("{shown:?}").contains("judge_key_123"));
    }

    #[tokio::test]
    async fn test_send_success_reports_status_and_body() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::detection_success(Language::En));
        let service = service_with(Arc::clone(&transport));

        let report = service.send(&sample_request()).await;

        assert!(report.success);
        assert_eq!(report.status_code, 200);
        assert!(report.error_message.is_empty());
        let body = report.response_object().expect("parsed body");
        assert_eq!(body["classification"], "AI_GENERATED");

        // the wire request carried the payload and all three headers
        let recorded = transport.last_request().expect("recorded request");
        assert_eq!(recorded.url, "https://api.example.com/detect");
        assert_eq!(recorded.headers.len(), 3);
        let sent: serde_json::Value =
            serde_json::from_slice(recorded.body.as_deref().unwrap_or_default()).unwrap();
        assert!(sent.get("audio_url").is_some());
        assert!(sent.get("audio_base64").is_none());
    }

    #[tokio::test]
    async fn test_send_non_json_body_keeps_raw_text() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::text(200, "plain text answer"));
        let service = service_with(Arc::clone(&transport));

        let report = service.send(&sample_request()).await;

        assert!(report.success);
        assert!(report.response_object().is_none());
        assert_eq!(report.raw_response, "plain text answer");
    }

    #[tokio::test]
    async fn test_send_timeout_uses_dedicated_convention() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_failure(TransportError::Timeout {
            timeout: Duration::from_secs(5),
        });
        let service = service_with(Arc::clone(&transport));

        let report = service.send(&sample_request()).await;

        assert!(!report.success);
        assert_eq!(report.status_code, STATUS_TIMEOUT);
        assert_eq!(report.latency_ms, 5000.0);
        assert!(report.error_message.contains("timed out after 5 seconds"));
    }

    #[tokio::test]
    async fn test_send_connection_failure_reports_zero_sentinel() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_failure(TransportError::Connection {
            message: "dns error: no such host".to_string(),
        });
        let service = service_with(Arc::clone(&transport));

        let report = service.send(&sample_request()).await;

        assert!(!report.success);
        assert_eq!(report.status_code, 0);
        assert_eq!(report.latency_ms, 0.0);
        assert!(report.error_message.starts_with("Connection failed"));
        assert_eq!(report.raw_response, "dns error: no such host");
    }

    #[tokio::test]
    async fn test_send_generic_transport_fault() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_failure(TransportError::Request {
            message: "request body rejected".to_string(),
        });
        let service = service_with(Arc::clone(&transport));

        let report = service.send(&sample_request()).await;

        assert!(!report.success);
        assert_eq!(report.status_code, 0);
        assert_eq!(
            report.error_message,
            "Request failed: request body rejected"
        );
    }

    #[tokio::test]
    async fn test_send_error_status_is_not_success() {
        let transport = Arc::new(MockTransport::new());
        transport.queue(MockResponse::unauthorized());
        let service = service_with(Arc::clone(&transport));

        let report = service.send(&sample_request()).await;

        assert!(!report.success);
        assert_eq!(report.status_code, 401);
        // an HTTP-level failure is still a received response, not an error
        assert!(report.error_message.is_empty());
        assert!(report.response_object().is_some());
    }
}
