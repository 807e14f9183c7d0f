//! Outbound payload types for a detection probe.
//!
//! The wire shape is fixed by the judging contract: a `language` code, exactly
//! one audio key, and a `metadata` block identifying the tester. Audio mode
//! exclusivity is structural — [`AudioInput`] is a sum type whose active
//! variant contributes its single key when flattened into the payload, so a
//! request carrying both `audio_url` and `audio_base64` cannot be expressed.

use chrono::Utc;
use serde::Serialize;

use crate::errors::ProbeResult;
use crate::types::language::Language;
use crate::validation::{validate_audio_base64, validate_audio_url};

/// Identifier stamped into every payload's metadata block.
pub const TESTER_IDENT: &str = concat!("voiceprobe/", env!("CARGO_PKG_VERSION"));

/// Placeholder used when the judge leaves the free-text message empty.
pub const DEFAULT_MESSAGE: &str = "API Test Request";

/// Timestamp format written into payload metadata (UTC, second precision).
const METADATA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The two mutually exclusive ways to hand an audio sample to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AudioInput {
    /// Reference to a hosted audio file.
    Url {
        /// Publicly reachable `.mp3`/`.wav` location.
        audio_url: String,
    },
    /// Inline encoded audio bytes.
    Base64 {
        /// Standard-alphabet Base64 content, no data-URI prefix.
        audio_base64: String,
    },
}

impl AudioInput {
    /// Creates a URL-mode input, trimming surrounding whitespace.
    pub fn url(url: impl Into<String>) -> Self {
        AudioInput::Url {
            audio_url: url.into().trim().to_string(),
        }
    }

    /// Creates a Base64-mode input, trimming surrounding whitespace.
    pub fn base64(data: impl Into<String>) -> Self {
        AudioInput::Base64 {
            audio_base64: data.into().trim().to_string(),
        }
    }

    /// JSON key the active variant serializes under.
    pub fn wire_key(&self) -> &'static str {
        match self {
            AudioInput::Url { .. } => "audio_url",
            AudioInput::Base64 { .. } => "audio_base64",
        }
    }

    /// Runs the mode-appropriate audio validator against the carried value.
    pub fn validate(&self) -> ProbeResult<()> {
        match self {
            AudioInput::Url { audio_url } => validate_audio_url(audio_url)?,
            AudioInput::Base64 { audio_base64 } => validate_audio_base64(audio_base64)?,
        }
        Ok(())
    }
}

/// Metadata block attached to every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadMetadata {
    /// Judge-supplied note, or [`DEFAULT_MESSAGE`] when left empty.
    pub message: String,
    /// Payload build time, UTC `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: String,
    /// Identifier of the tool that produced the request.
    pub tester: String,
}

impl PayloadMetadata {
    /// Stamps a metadata block at the current instant.
    pub fn stamp(message: &str) -> Self {
        let message = if message.trim().is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            message.to_string()
        };

        PayloadMetadata {
            message,
            timestamp: Utc::now().format(METADATA_TIMESTAMP_FORMAT).to_string(),
            tester: TESTER_IDENT.to_string(),
        }
    }
}

/// JSON body POSTed to the endpoint under test.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionPayload {
    /// Declared sample language.
    pub language: Language,
    /// Active audio input, flattened to its single variant key.
    #[serde(flatten)]
    pub audio: AudioInput,
    /// Request metadata.
    pub metadata: PayloadMetadata,
}

/// Inputs for one probe invocation.
///
/// Construction through [`DetectionRequest::builder`] validates the audio
/// value for its mode; the probe itself assumes a well-formed request.
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    /// Audio sample in one of the two modes.
    pub audio: AudioInput,
    /// Language code to declare in the payload.
    pub language: Language,
    /// Free-text note; an empty value becomes [`DEFAULT_MESSAGE`] at build time.
    pub message: String,
}

impl DetectionRequest {
    /// Creates a request with the default language (`auto`) and no message.
    pub fn new(audio: AudioInput) -> Self {
        DetectionRequest {
            audio,
            language: Language::default(),
            message: String::new(),
        }
    }

    /// Creates a new request builder.
    pub fn builder() -> DetectionRequestBuilder {
        DetectionRequestBuilder::new()
    }

    /// Validates the audio input for its mode.
    pub fn validate(&self) -> ProbeResult<()> {
        self.audio.validate()
    }
}

/// Builder for [`DetectionRequest`].
#[derive(Debug, Default)]
pub struct DetectionRequestBuilder {
    audio: Option<AudioInput>,
    language: Language,
    message: String,
}

impl DetectionRequestBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the audio sample by URL reference.
    pub fn audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio = Some(AudioInput::url(url));
        self
    }

    /// Supplies the audio sample as inline Base64.
    pub fn audio_base64(mut self, data: impl Into<String>) -> Self {
        self.audio = Some(AudioInput::base64(data));
        self
    }

    /// Sets the language to declare.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets the free-text message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Builds the request, validating the audio input for its mode.
    pub fn build(self) -> ProbeResult<DetectionRequest> {
        let audio = self.audio.ok_or_else(|| {
            crate::errors::ProbeError::configuration("an audio input (URL or Base64) is required")
        })?;

        let request = DetectionRequest {
            audio,
            language: self.language,
            message: self.message,
        };
        request.validate()?;
        Ok(request)
    }
}
