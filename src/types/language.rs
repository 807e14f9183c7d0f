//! Supported language codes.
//!
//! One fixed set backs everything: request validation, the serialized
//! `language` payload field, and response schema checking. There is no
//! mutation path; extending the set is a code change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Language declared for an audio sample.
///
/// `Auto` asks the endpoint to detect the language itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Let the endpoint detect the language.
    #[default]
    Auto,
    /// English.
    En,
    /// Hindi.
    Hi,
    /// Tamil.
    Ta,
    /// Malayalam.
    Ml,
    /// Telugu.
    Te,
}

impl Language {
    /// Wire code for this language.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
            Language::Ml => "ml",
            Language::Te => "te",
        }
    }

    /// Returns true when `code` is a member of the supported set.
    pub fn is_supported(code: &str) -> bool {
        Language::from_str(code).is_ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "auto" => Ok(Language::Auto),
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            "ta" => Ok(Language::Ta),
            "ml" => Ok(Language::Ml),
            "te" => Ok(Language::Te),
            other => Err(ValidationError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Wire codes of every supported language, in declaration order.
pub fn supported_codes() -> [&'static str; 6] {
    ["auto", "en", "hi", "ta", "ml", "te"]
}
