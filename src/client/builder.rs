use crate::client::core::ApiClient;
use crate::config::{normalize_base_url, AppConfig};
use crate::transport::{HttpTransport, DEFAULT_TIMEOUT};
use crate::Result;
use std::time::Duration;

/// Builder for [`ApiClient`].
///
/// Keep this surface area small and predictable.
pub struct ApiClientBuilder {
    config: Option<AppConfig>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    timeout: Duration,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            base_url_override: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use an already loaded configuration. Defaults to [`AppConfig::default`].
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the base URL from the configuration.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Override the request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut config = self.config.unwrap_or_default();
        if let Some(base_url) = self.base_url_override {
            config.api_base_url = normalize_base_url(&base_url)?;
        }

        let transport = HttpTransport::new(&config.api_base_url, self.timeout)?;
        Ok(ApiClient { config, transport })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
