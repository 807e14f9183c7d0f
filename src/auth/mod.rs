//! Authentication for probe requests.
//!
//! Participant endpoints follow one of two observed header conventions:
//! `Authorization: Bearer <key>` or a raw `x-api-key` header. Neither is
//! universal, so both are first-class here and the active one is selected by
//! configuration. Exactly one credential header is ever applied per request;
//! [`AuthScheme::Bearer`] is the default and the documented convention.
//!
//! Credentials are held as [`SecretString`] end to end and never appear in
//! `Debug` output or logs; only a short hint of the key tail is exposed for
//! diagnostics.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::ProbeError;
use crate::validation::validate_api_key;

/// Header name used by the Bearer convention.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Header name used by the raw-key convention.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Which header convention carries the credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`. The default.
    #[default]
    Bearer,
    /// Raw `x-api-key: <key>` header.
    ApiKeyHeader,
}

impl AuthScheme {
    /// Builds the provider implementing this scheme for `api_key`.
    pub fn provider(self, api_key: SecretString) -> Arc<dyn AuthProvider> {
        match self {
            AuthScheme::Bearer => Arc::new(BearerAuth::new(api_key)),
            AuthScheme::ApiKeyHeader => Arc::new(HeaderKeyAuth::new(api_key)),
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Bearer => f.write_str("Bearer"),
            AuthScheme::ApiKeyHeader => f.write_str("x-api-key"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(AuthScheme::Bearer),
            "x-api-key" => Ok(AuthScheme::ApiKeyHeader),
            other => Err(ProbeError::configuration(format!(
                "unknown auth scheme '{other}'; expected 'bearer' or 'x-api-key'"
            ))),
        }
    }
}

/// Authentication provider trait.
///
/// Implementations apply exactly one credential header to a request.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HashMap<String, String>);

    /// The scheme this provider implements.
    fn scheme(&self) -> AuthScheme;

    /// Validate the credential.
    fn validate(&self) -> Result<(), ProbeError>;

    /// A redacted hint of the credential (last 4 characters).
    fn key_hint(&self) -> String;
}

/// Bearer token authentication provider.
pub struct BearerAuth {
    api_key: SecretString,
}

impl BearerAuth {
    /// Creates a new Bearer authentication provider.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates from a string API key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }
}

impl AuthProvider for BearerAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );
    }

    fn scheme(&self) -> AuthScheme {
        AuthScheme::Bearer
    }

    fn validate(&self) -> Result<(), ProbeError> {
        validate_api_key(self.api_key.expose_secret())?;
        Ok(())
    }

    fn key_hint(&self) -> String {
        hint(self.api_key.expose_secret())
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}

/// Raw `x-api-key` header authentication provider.
pub struct HeaderKeyAuth {
    api_key: SecretString,
}

impl HeaderKeyAuth {
    /// Creates a new raw-header authentication provider.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates from a string API key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }
}

impl AuthProvider for HeaderKeyAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            API_KEY_HEADER.to_string(),
            self.api_key.expose_secret().to_string(),
        );
    }

    fn scheme(&self) -> AuthScheme {
        AuthScheme::ApiKeyHeader
    }

    fn validate(&self) -> Result<(), ProbeError> {
        validate_api_key(self.api_key.expose_secret())?;
        Ok(())
    }

    fn key_hint(&self) -> String {
        hint(self.api_key.expose_secret())
    }
}

impl fmt::Debug for HeaderKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderKeyAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}

/// Last four characters of `key`, or a fully masked placeholder for keys too
/// short to hint safely. Boundary-safe for multi-byte keys.
pub(crate) fn hint(key: &str) -> String {
    match key.char_indices().rev().nth(3) {
        Some((index, _)) if index > 0 => format!("...{}", &key[index..]),
        _ => "****".to_string(),
    }
}
