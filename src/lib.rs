//! Voice Detection API Tester
//!
//! A production-ready Rust client for exercising HTTP endpoints that claim to
//! classify speech audio as AI-generated or human. Submits audio by hosted URL
//! or inline Base64, normalizes every outcome into a uniform report, and grades
//! status codes and response schemas the way a contest judge would.
//!
//! # Features
//!
//! - **Input Validation**: URL, audio reference, Base64 payload, API key, and
//!   language checks that collect every problem instead of stopping at the first
//! - **Two Audio Modes**: hosted-URL or inline Base64 submission, never both
//! - **Uniform Reports**: success, HTTP error, timeout, and connection failure
//!   all land in the same [`TestReport`] shape
//! - **Status Interpretation**: PASS / FAIL / UNKNOWN verdicts with
//!   judge-facing messages for every status code
//! - **Schema Validation**: response conformance warnings that never abort a run
//! - **Observability**: `tracing`-based structured logging with credential
//!   redaction
//! - **Testability**: the HTTP layer sits behind a transport trait, with a mock
//!   implementation behind the `mocks` feature
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voiceprobe::{DetectionRequest, Language, ProbeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ProbeClient::builder()
//!         .endpoint_url("https://api.example.com/detect")
//!         .api_key("judge_key_12345")
//!         .build()?;
//!
//!     let request = DetectionRequest::builder()
//!         .audio_url("https://cdn.example.com/samples/clip.mp3")
//!         .language(Language::En)
//!         .build()?;
//!
//!     let report = client.run(&request).await;
//!     println!(
//!         "status {} in {} (success: {})",
//!         report.status_code,
//!         report.latency_display(),
//!         report.success
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Grading a Response
//!
//! ```rust
//! use voiceprobe::{interpret_status, validate_response, Verdict};
//!
//! let verdict = interpret_status(200);
//! assert_eq!(verdict.verdict, Verdict::Pass);
//!
//! let body = serde_json::json!({
//!     "status": "success",
//!     "classification": "AI_GENERATED",
//!     "confidence": 0.82,
//!     "explanation": "Low jitter variance across voiced segments."
//! });
//! let schema = validate_response(body.as_object().unwrap());
//! assert!(schema.is_valid);
//! assert!(schema.warnings.is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod schema;
pub mod services;
pub mod transport;
pub mod types;
pub mod validation;
pub mod verdict;

// Re-exports for convenience
pub use client::{ProbeClient, ProbeClientBuilder};
pub use config::{ProbeConfig, DEFAULT_TIMEOUT};
pub use errors::{ProbeError, ProbeResult, ValidationError};

// Type re-exports
pub use auth::AuthScheme;
pub use schema::{validate_response, SchemaReport};
pub use types::{
    AudioInput, DetectionPayload, DetectionRequest, DetectionRequestBuilder, Language, TestReport,
};
pub use validation::{preflight, ProbeInputs};
pub use verdict::{interpret_status, Severity, StatusVerdict, Verdict};

/// Mock transport and canned reference-backend fixtures for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
