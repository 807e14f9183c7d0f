//! Probe client.
//!
//! The facade the presentation layer talks to: one client per test target,
//! one call per test.

use std::sync::Arc;

use crate::auth::{AuthProvider, AuthScheme};
use crate::config::{ProbeConfig, ProbeConfigBuilder};
use crate::errors::ProbeResult;
use crate::services::DetectionService;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{DetectionRequest, TestReport};

/// Client for probing one AI voice detection endpoint.
///
/// Owns the validated configuration and the detection service wired to it.
/// Construction fails fast on a bad configuration; a constructed client's
/// probe call never fails — every outcome is a [`TestReport`].
///
/// # Example
///
/// ```rust,no_run
/// use voiceprobe::{DetectionRequest, Language, ProbeClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ProbeClient::builder()
///         .endpoint_url("https://participant.example.com/detect")
///         .api_key("judge-key")
///         .build()?;
///
///     let request = DetectionRequest::builder()
///         .audio_url("https://cdn.example.com/sample.mp3")
///         .language(Language::En)
///         .build()?;
///
///     let report = client.run(&request).await;
///     println!("{} in {}", report.status_code, report.latency_display());
///     Ok(())
/// }
/// ```
pub struct ProbeClient {
    config: ProbeConfig,
    detection_service: DetectionService,
}

impl ProbeClient {
    /// Creates a new client builder.
    pub fn builder() -> ProbeClientBuilder {
        ProbeClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `VOICEPROBE_ENDPOINT_URL` and `VOICEPROBE_API_KEY`, and
    /// optionally `VOICEPROBE_TIMEOUT` and `VOICEPROBE_AUTH_SCHEME`.
    pub fn from_env() -> ProbeResult<Self> {
        let config = ProbeConfig::from_env()?;
        ProbeClientBuilder::from_config(config).build()
    }

    /// Creates a client from an existing configuration.
    pub fn from_config(config: ProbeConfig) -> ProbeResult<Self> {
        ProbeClientBuilder::from_config(config).build()
    }

    /// Returns the detection service.
    pub fn detection(&self) -> &DetectionService {
        &self.detection_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Runs one test: a single POST, every outcome folded into the report.
    pub async fn run(&self, request: &DetectionRequest) -> TestReport {
        self.detection_service.send(request).await
    }
}

impl std::fmt::Debug for ProbeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the probe client.
pub struct ProbeClientBuilder {
    config_builder: ProbeConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl ProbeClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: ProbeConfigBuilder::new(),
            transport: None,
            auth: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: ProbeConfig) -> Self {
        Self {
            config_builder: ProbeConfigBuilder::new()
                .endpoint_url(&config.endpoint_url)
                .api_key(config.api_key())
                .timeout(config.timeout)
                .auth_scheme(config.auth_scheme),
            transport: None,
            auth: None,
        }
    }

    /// Sets the endpoint URL.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.endpoint_url(endpoint_url);
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the API key from an environment variable.
    pub fn api_key_from_env(mut self, var_name: &str) -> ProbeResult<Self> {
        self.config_builder = self.config_builder.api_key_from_env(var_name)?;
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Sets the credential header convention.
    pub fn auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.config_builder = self.config_builder.auth_scheme(scheme);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the client.
    pub fn build(self) -> ProbeResult<ProbeClient> {
        let config = self.config_builder.build()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(config.timeout).map_err(|e| {
                crate::errors::ProbeError::Configuration {
                    message: e.to_string(),
                }
            })?),
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(a) => a,
            None => config.auth_provider(),
        };

        let detection_service = DetectionService::new(
            Arc::clone(&transport),
            Arc::clone(&auth),
            &config.endpoint_url,
            config.timeout,
        );

        Ok(ProbeClient {
            config,
            detection_service,
        })
    }
}

impl Default for ProbeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HeaderKeyAuth;
    use crate::mocks::{fixtures, MockTransport};
    use crate::types::{AudioInput, Language};

    #[test]
    fn test_builder_requires_endpoint_and_key() {
        assert!(ProbeClientBuilder::new().build().is_err());
        assert!(ProbeClientBuilder::new()
            .endpoint_url("https://api.example.com/detect")
            .build()
            .is_err());
        assert!(ProbeClientBuilder::new()
            .endpoint_url("https://api.example.com/detect")
            .api_key("judge_key")
            .build()
            .is_ok());
    }

    #[tokio::test]
    async fn test_run_through_mock_transport() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::detection_success(Language::Hi));

        let client = ProbeClient::builder()
            .endpoint_url("https://api.example.com/detect")
            .api_key("judge_key")
            .transport(Arc::clone(&transport) as Arc<dyn HttpTransport>)
            .build()
            .unwrap();

        let request = DetectionRequest {
            audio: AudioInput::url("https://cdn.example.com/sample.mp3"),
            language: Language::Hi,
            message: String::new(),
        };
        let report = client.run(&request).await;

        assert!(report.success);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_custom_auth_reaches_the_wire() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        let transport = Arc::new(MockTransport::new());

        let client = ProbeClient::builder()
            .endpoint_url("https://api.example.com/detect")
            .api_key("judge_key")
            .transport(Arc::clone(&transport) as Arc<dyn HttpTransport>)
            .auth(Arc::new(HeaderKeyAuth::from_string("judge_key")))
            .build()
            .unwrap();

        let request = DetectionRequest::builder()
            .audio_base64(STANDARD.encode([7u8; 120]))
            .build()
            .unwrap();
        let _ = client.run(&request).await;

        let recorded = transport.last_request().expect("request recorded");
        assert!(recorded.headers.contains_key("x-api-key"));
        assert!(!recorded.headers.contains_key("Authorization"));
    }

    #[test]
    fn test_scheme_selects_default_provider() {
        let client = ProbeClient::builder()
            .endpoint_url("https://api.example.com/detect")
            .api_key("judge_key")
            .auth_scheme(AuthScheme::ApiKeyHeader)
            .build()
            .unwrap();

        assert_eq!(client.config().auth_scheme, AuthScheme::ApiKeyHeader);
    }
}
