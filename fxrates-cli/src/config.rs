//! Provider settings read from flags or the environment.

use std::time::Duration;

use clap::Args;
use fxrates_client::ProviderConfig;

/// Provider settings.
#[derive(Debug, Args)]
pub struct Settings {
    /// exchangeratesapi.io access key
    #[arg(long, env = "EXCHANGE_RATES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the provider API
    #[arg(long, env = "EXCHANGE_RATES_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "EXCHANGE_RATES_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Settings {
    /// Builds the provider configuration, failing if the access key is missing.
    pub fn provider_config(&self) -> anyhow::Result<ProviderConfig> {
        let mut config = ProviderConfig::new(self.api_key.clone())?
            .with_timeout(Duration::from_secs(self.timeout_secs))?;
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url)?;
        }
        Ok(config)
    }
}
