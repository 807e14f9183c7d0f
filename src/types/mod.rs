//! Core value types for the voiceprobe client.
//!
//! Everything here is an immutable value record: payloads are built once per
//! invocation, reports are produced once and only read afterwards.

pub mod language;
pub mod payload;
pub mod report;

pub use language::{supported_codes, Language};
pub use payload::{
    AudioInput, DetectionPayload, DetectionRequest, DetectionRequestBuilder, PayloadMetadata,
    DEFAULT_MESSAGE, TESTER_IDENT,
};
pub use report::{
    format_latency, TestReport, MAX_RAW_RESPONSE_CHARS, STATUS_NO_RESPONSE, STATUS_TIMEOUT,
};
