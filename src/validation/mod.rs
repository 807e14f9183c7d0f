//! Pre-flight input validators.
//!
//! Pure functions over raw judge-entered strings. Malformed input is the
//! expected case here, not an exceptional one: every check returns a value
//! carrying a display-ready reason and nothing panics. The aggregate
//! [`preflight`] check runs every applicable validator and collects all
//! failures, so a judge sees the complete list of problems in one pass.
//!
//! Nothing in this module touches the network; the probe itself assumes
//! inputs that already passed these checks.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use url::Url;

use crate::errors::ValidationError;
use crate::types::{AudioInput, Language};

/// Minimum decoded byte length for a plausible audio sample.
///
/// A heuristic floor to catch placeholder or garbage input, not a format
/// check.
pub const MIN_AUDIO_BYTES: usize = 100;

/// Checks that `text` is a well-formed `http`/`https` URL with a host.
pub fn validate_url(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    match Url::parse(trimmed) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ValidationError::InvalidScheme);
            }
            if parsed.host_str().map_or(true, str::is_empty) {
                return Err(ValidationError::MissingHost);
            }
            Ok(())
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => Err(ValidationError::InvalidScheme),
        Err(url::ParseError::EmptyHost) => Err(ValidationError::MissingHost),
        Err(other) => Err(ValidationError::MalformedUrl(other.to_string())),
    }
}

/// Checks that `text` is a valid URL pointing at an `.mp3` or `.wav` path.
///
/// The query string is ignored; the extension check is case-insensitive.
pub fn validate_audio_url(text: &str) -> Result<(), ValidationError> {
    validate_url(text)?;

    let parsed = Url::parse(text.trim())
        .map_err(|err| ValidationError::MalformedUrl(err.to_string()))?;
    let path = parsed.path().to_ascii_lowercase();
    if path.ends_with(".mp3") || path.ends_with(".wav") {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedAudioExtension)
    }
}

/// Checks that `text` is plausible Base64-encoded audio.
///
/// Rejects data-URI prefixed strings outright (callers must supply the raw
/// encoded content) and decodes under the strict standard alphabet — no
/// lenient skip-invalid-characters mode. The decoded size must reach
/// [`MIN_AUDIO_BYTES`].
pub fn validate_audio_base64(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAudio);
    }
    if trimmed.starts_with("data:") {
        return Err(ValidationError::DataUriPrefix);
    }

    let decoded = BASE64_STANDARD
        .decode(trimmed)
        .map_err(|err| ValidationError::InvalidBase64(err.to_string()))?;
    if decoded.len() < MIN_AUDIO_BYTES {
        return Err(ValidationError::AudioTooShort {
            decoded_len: decoded.len(),
        });
    }
    Ok(())
}

/// Checks that the API key is non-empty after trimming.
pub fn validate_api_key(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyApiKey);
    }
    Ok(())
}

/// Checks that `code` is a member of the supported language set.
pub fn validate_language(code: &str) -> Result<(), ValidationError> {
    code.parse::<Language>().map(|_| ())
}

/// Raw judge-entered values for one test, prior to any validation.
///
/// This is the hand-off shape from the form layer: the probe is only invoked
/// once [`preflight`] returns no failures.
#[derive(Debug, Clone)]
pub struct ProbeInputs {
    /// Endpoint URL to POST to.
    pub endpoint_url: String,
    /// Credential to pass through.
    pub api_key: String,
    /// Audio sample, already committed to one mode.
    pub audio: AudioInput,
    /// Language code as entered.
    pub language: String,
    /// Optional free-text message.
    pub message: String,
}

/// Runs every applicable validator over `inputs` and collects all failures.
///
/// Failures are field-prefixed, display-ready strings — never just the first
/// problem. An empty list means the test may proceed.
pub fn preflight(inputs: &ProbeInputs) -> Vec<String> {
    let mut failures = Vec::new();

    if let Err(err) = validate_url(&inputs.endpoint_url) {
        failures.push(format!("Endpoint URL: {err}"));
    }
    if let Err(err) = validate_api_key(&inputs.api_key) {
        failures.push(format!("API key: {err}"));
    }
    match &inputs.audio {
        AudioInput::Url { audio_url } => {
            if let Err(err) = validate_audio_url(audio_url) {
                failures.push(format!("Audio URL: {err}"));
            }
        }
        AudioInput::Base64 { audio_base64 } => {
            if let Err(err) = validate_audio_base64(audio_base64) {
                failures.push(format!("Audio Base64: {err}"));
            }
        }
    }
    if let Err(err) = validate_language(&inputs.language) {
        failures.push(format!("Language: {err}"));
    }

    failures
}
