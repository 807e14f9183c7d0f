//! Probe configuration.
//!
//! One [`ProbeConfig`] describes one test target: where to POST, which
//! credential to pass through, how it is carried, and how long to wait.
//! Configurations are immutable once built and cheap to clone; a fresh one is
//! expected per differing target rather than mutating a shared instance.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthProvider, AuthScheme};
use crate::errors::{ProbeError, ProbeResult};
use crate::validation::{validate_api_key, validate_url};

/// Default request timeout (15 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment variable carrying the endpoint URL.
pub const ENV_ENDPOINT_URL: &str = "VOICEPROBE_ENDPOINT_URL";
/// Environment variable carrying the API key.
pub const ENV_API_KEY: &str = "VOICEPROBE_API_KEY";
/// Environment variable carrying the timeout in seconds.
pub const ENV_TIMEOUT: &str = "VOICEPROBE_TIMEOUT";
/// Environment variable carrying the auth scheme name.
pub const ENV_AUTH_SCHEME: &str = "VOICEPROBE_AUTH_SCHEME";

/// Configuration for one probe target.
#[derive(Clone)]
pub struct ProbeConfig {
    /// API key passed through to the tested endpoint (stored securely).
    pub(crate) api_key: SecretString,
    /// Absolute endpoint URL to POST to.
    pub endpoint_url: String,
    /// Upper bound on total network wait.
    pub timeout: Duration,
    /// Header convention carrying the credential.
    pub auth_scheme: AuthScheme,
}

impl ProbeConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ProbeConfigBuilder {
        ProbeConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `VOICEPROBE_ENDPOINT_URL` (required): endpoint to POST to
    /// - `VOICEPROBE_API_KEY` (required): credential to pass through
    /// - `VOICEPROBE_TIMEOUT` (optional): timeout in seconds
    /// - `VOICEPROBE_AUTH_SCHEME` (optional): `bearer` or `x-api-key`
    pub fn from_env() -> ProbeResult<Self> {
        let endpoint_url =
            std::env::var(ENV_ENDPOINT_URL).map_err(|_| ProbeError::Configuration {
                message: format!("{ENV_ENDPOINT_URL} environment variable not set"),
            })?;
        let api_key = std::env::var(ENV_API_KEY).map_err(|_| ProbeError::Configuration {
            message: format!("{ENV_API_KEY} environment variable not set"),
        })?;

        let mut builder = ProbeConfigBuilder::new()
            .endpoint_url(endpoint_url)
            .api_key(api_key);

        if let Ok(timeout_str) = std::env::var(ENV_TIMEOUT) {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        if let Ok(scheme_str) = std::env::var(ENV_AUTH_SCHEME) {
            builder = builder.auth_scheme(scheme_str.parse()?);
        }

        builder.build()
    }

    /// Returns the API key (exposing the secret).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Returns the API key hint (last 4 characters) for debugging.
    pub fn api_key_hint(&self) -> String {
        crate::auth::hint(self.api_key.expose_secret())
    }

    /// Builds the auth provider for the configured scheme.
    pub fn auth_provider(&self) -> Arc<dyn AuthProvider> {
        self.auth_scheme.provider(self.api_key.clone())
    }
}

impl std::fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout", &self.timeout)
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

/// Builder for `ProbeConfig`.
#[derive(Default)]
pub struct ProbeConfigBuilder {
    endpoint_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    auth_scheme: Option<AuthScheme>,
}

impl ProbeConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint URL.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> ProbeResult<Self> {
        let api_key = std::env::var(var_name).map_err(|_| ProbeError::Configuration {
            message: format!("Environment variable {var_name} not set"),
        })?;
        self.api_key = Some(api_key);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the credential header convention.
    pub fn auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = Some(scheme);
        self
    }

    /// Builds the configuration.
    ///
    /// Validates that the endpoint URL is a well-formed http(s) URL with a
    /// host, the API key is non-blank, and the timeout is strictly positive.
    /// Plain `http` targets are accepted: judges routinely point the probe at
    /// local participant endpoints.
    pub fn build(self) -> ProbeResult<ProbeConfig> {
        let endpoint_url = self
            .endpoint_url
            .ok_or_else(|| ProbeError::Configuration {
                message: "endpoint URL is required".to_string(),
            })?
            .trim()
            .to_string();
        validate_url(&endpoint_url).map_err(|e| ProbeError::Configuration {
            message: format!("endpoint URL invalid: {e}"),
        })?;

        let api_key = self.api_key.ok_or_else(|| ProbeError::Configuration {
            message: "API key is required".to_string(),
        })?;
        validate_api_key(&api_key).map_err(|e| ProbeError::Configuration {
            message: e.to_string(),
        })?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ProbeError::Configuration {
                message: "timeout must be positive".to_string(),
            });
        }

        Ok(ProbeConfig {
            api_key: SecretString::new(api_key),
            endpoint_url,
            timeout,
            auth_scheme: self.auth_scheme.unwrap_or_default(),
        })
    }
}
