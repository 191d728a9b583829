//! Provider connection settings.

use std::time::Duration;

use fxrates_types::ConfigError;

/// Settings for talking to the rate provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://api.exchangeratesapi.io/v1";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration from the provider access key.
    ///
    /// An absent or blank key is a configuration error.
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Overrides the provider base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }
}
