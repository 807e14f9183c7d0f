//! Error types for the voiceprobe client.
//!
//! Two distinct error vocabularies live here. [`ValidationError`] describes
//! why a raw input (URL, Base64 blob, API key, language code) was rejected
//! before any network activity; its `Display` strings are written for direct
//! display to the judge. [`ProbeError`] is the fallible surface of the crate
//! itself: configuration and construction problems.
//!
//! Transport failures are deliberately *not* errors. Every network outcome —
//! including timeouts and refused connections — is normalized into a
//! [`TestReport`](crate::types::TestReport), so callers never need
//! fault-handling logic around a probe run.

use thiserror::Error;

use crate::types::language::supported_codes;

/// Result type alias for voiceprobe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Error type for client configuration and request construction.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Configuration error (missing credential, malformed endpoint, zero timeout).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration issue.
        message: String,
    },

    /// An input failed validation while constructing a request.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ProbeError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        ProbeError::Configuration {
            message: message.into(),
        }
    }
}

/// Why a raw input was rejected by one of the pre-flight validators.
///
/// Malformed input is the expected case for a judge tool, so these are plain
/// values rather than faults: every variant renders a human-readable reason
/// and validators never panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The URL was empty or whitespace-only.
    #[error("URL cannot be empty")]
    EmptyUrl,

    /// The URL scheme was not http or https.
    #[error("URL must start with http:// or https://")]
    InvalidScheme,

    /// The URL had no host component.
    #[error("invalid URL format - missing domain")]
    MissingHost,

    /// The URL did not parse at all.
    #[error("URL parsing error: {0}")]
    MalformedUrl(String),

    /// The audio URL path does not end in a supported extension.
    #[error("audio URL must end with .mp3 or .wav")]
    UnsupportedAudioExtension,

    /// The Base64 audio payload was empty or whitespace-only.
    #[error("Base64 audio data cannot be empty")]
    EmptyAudio,

    /// The Base64 payload still carries a data-URI prefix.
    #[error("remove the data URI prefix (e.g. 'data:audio/mp3;base64,') and provide only the Base64 content")]
    DataUriPrefix,

    /// The text is not valid standard Base64 under strict decoding.
    #[error("invalid Base64 encoding: {0}")]
    InvalidBase64(String),

    /// The decoded audio is below the minimum plausible size.
    #[error("decoded audio is only {decoded_len} bytes, too short for an audio file")]
    AudioTooShort {
        /// Number of bytes the Base64 text decoded to.
        decoded_len: usize,
    },

    /// The API key was empty or whitespace-only.
    #[error("API key cannot be empty")]
    EmptyApiKey,

    /// The language code is not in the supported set.
    #[error("invalid language '{0}'; allowed: {}", supported_codes().join(", "))]
    UnsupportedLanguage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(ValidationError::EmptyUrl.to_string(), "URL cannot be empty");
        assert_eq!(
            ValidationError::AudioTooShort { decoded_len: 42 }.to_string(),
            "decoded audio is only 42 bytes, too short for an audio file"
        );
    }

    #[test]
    fn test_unsupported_language_lists_allowed_codes() {
        let message = ValidationError::UnsupportedLanguage("xx".to_string()).to_string();
        assert!(message.contains("'xx'"));
        assert!(message.contains("auto"));
        assert!(message.contains("te"));
    }

    #[test]
    fn test_probe_error_from_validation() {
        let err: ProbeError = ValidationError::EmptyApiKey.into();
        assert!(matches!(err, ProbeError::Validation(_)));
        assert!(err.to_string().contains("API key cannot be empty"));
    }

    #[test]
    fn test_configuration_helper() {
        let err = ProbeError::configuration("timeout must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: timeout must be positive"
        );
    }
}
