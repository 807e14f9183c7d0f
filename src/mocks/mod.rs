//! Mock implementations for testing.
//!
//! Provides a scriptable transport and canned reference-endpoint bodies so
//! probe behavior can be tested without real network calls. The transport
//! queues full outcomes, not just responses: transport-level failures
//! (timeout, refused connection) are first-class here because normalizing
//! them is most of what the probe does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
pub struct MockTransport {
    outcomes: Mutex<Vec<MockOutcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

enum MockOutcome {
    Response(MockResponse),
    Failure(TransportError),
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a 200 JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates a plain-text response.
    pub fn text(status: u16, body: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());

        Self {
            status,
            headers,
            body: body.as_bytes().to_vec(),
        }
    }

    /// Creates the reference endpoint's 401 answer.
    pub fn unauthorized() -> Self {
        Self::json(&fixtures::invalid_key_error()).with_status(401)
    }

    /// Creates the reference endpoint's 422 answer for a bad audio format.
    pub fn unprocessable() -> Self {
        Self::json(&fixtures::unsupported_format_error()).with_status(422)
    }

    /// Creates a response with custom status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push(MockOutcome::Response(response));
        }
    }

    /// Queues a JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues a transport-level failure.
    pub fn queue_failure(&self, error: TransportError) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push(MockOutcome::Failure(error));
        }
    }

    /// Sets the default response returned once the queue is empty.
    pub fn set_default(&self, response: MockResponse) {
        if let Ok(mut default) = self.default_response.lock() {
            *default = Some(response);
        }
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .ok()
            .and_then(|requests| requests.last().cloned())
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }

    fn next_outcome(&self) -> MockOutcome {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            if !outcomes.is_empty() {
                return outcomes.remove(0);
            }
        }
        let default = self
            .default_response
            .lock()
            .ok()
            .and_then(|default| default.clone());
        MockOutcome::Response(default.unwrap_or_else(|| {
            MockResponse::json(&serde_json::json!({
                "error": "no mock response configured"
            }))
            .with_status(500)
        }))
    }

    fn record(&self, request: &HttpRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: request.url.clone(),
                headers: request.headers.clone(),
                body: request.body.clone(),
            });
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.record(&request);

        match self.next_outcome() {
            MockOutcome::Response(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            MockOutcome::Failure(error) => Err(error),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Canned bodies and the decision tree of the reference detection endpoint.
///
/// The reference backend is not served by this crate; what the probe needs is
/// its *contract* — the deterministic 200 body and the 401/422 error shapes —
/// so tests can script realistic participant behavior.
pub mod fixtures {
    use base64::alphabet;
    use base64::engine::general_purpose::GeneralPurposeConfig;
    use base64::engine::{DecodePaddingMode, GeneralPurpose};
    use base64::Engine;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::types::Language;

    /// The reference backend's fixed classification.
    pub const CANNED_CLASSIFICATION: &str = "AI_GENERATED";
    /// The reference backend's fixed confidence.
    pub const CANNED_CONFIDENCE: f64 = 0.82;
    /// The reference backend's fixed explanation.
    pub const CANNED_EXPLANATION: &str = "Spectral inconsistencies and low jitter variance \
         indicate characteristics of AI-generated speech.";

    /// Padding-indifferent decoder mirroring the reference backend's lenient
    /// Base64 check (the probe's own input validation stays strict).
    const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
        &alphabet::STANDARD,
        GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );

    /// Whether the reference backend would accept `data` as audio.
    pub fn decodes_leniently(data: &str) -> bool {
        LENIENT_BASE64.decode(data).is_ok()
    }

    /// The deterministic 200 body.
    ///
    /// `auto` comes back as the out-of-set `unknown`, exactly as the
    /// reference backend answers it — a quirk the schema validator should be
    /// exercised against.
    pub fn detection_success(language: Language) -> Value {
        let detected = match language {
            Language::Auto => "unknown",
            other => other.as_str(),
        };
        json!({
            "status": "success",
            "classification": CANNED_CLASSIFICATION,
            "confidence": CANNED_CONFIDENCE,
            "language": detected,
            "explanation": CANNED_EXPLANATION,
            "processing_time_ms": 3,
            "request_id": Uuid::new_v4().to_string(),
        })
    }

    /// 401 body for a missing or too-short key.
    pub fn invalid_key_error() -> Value {
        json!({ "detail": "Invalid or missing API key" })
    }

    /// 422 body for an audio format outside {mp3, wav}.
    pub fn unsupported_format_error() -> Value {
        json!({ "detail": "Unsupported audio format. Use mp3 or wav." })
    }

    /// 422 body for undecodable audio data.
    pub fn invalid_audio_error() -> Value {
        json!({ "detail": "Invalid Base64 audio data" })
    }

    /// The reference endpoint's decision tree as a pure function.
    ///
    /// Key shorter than 3 after trimming → 401; format outside {mp3, wav} →
    /// 422; audio that fails the lenient decode → 422; otherwise the
    /// deterministic 200.
    pub fn reference_exchange(
        api_key: &str,
        audio_format: &str,
        audio_base64: &str,
        language: Language,
    ) -> (u16, Value) {
        if api_key.trim().len() < 3 {
            return (401, invalid_key_error());
        }
        if !matches!(audio_format.to_ascii_lowercase().as_str(), "mp3" | "wav") {
            return (422, unsupported_format_error());
        }
        if !decodes_leniently(audio_base64) {
            return (422, invalid_audio_error());
        }
        (200, detection_success(language))
    }
}
