//! # FX Rates Client
//!
//! A typed Rust client for the exchangeratesapi.io API.
//!
//! Every request carries the provider access key as the `access_key` query
//! parameter. Rate payloads are decoded into exact decimals.

mod config;

pub use config::ProviderConfig;

use chrono::NaiveDate;
use fxrates_types::{CurrencySymbolTable, ProviderError, RateProvider, RateSnapshot};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Body of the symbols endpoint.
#[derive(Debug, Deserialize)]
struct SymbolsResponse {
    symbols: CurrencySymbolTable,
}

/// Fields shared by every provider response.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: u16,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    info: Option<String>,
}

/// exchangeratesapi.io client.
pub struct ExchangeRatesApiClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl ExchangeRatesApiClient {
    /// Creates a new client with one shared HTTP session.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("fxrates/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url,
            api_key: config.api_key,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn symbols_url(&self) -> String {
        format!("{}/symbols", self.base_url)
    }

    pub fn latest_url(&self) -> String {
        format!("{}/latest", self.base_url)
    }

    pub fn historical_url(&self, date: NaiveDate) -> String {
        format!("{}/{}", self.base_url, date.format("%Y-%m-%d"))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .query(&[("access_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|env| {
                    env.error
                        .and_then(|e| e.info.or(e.kind))
                        .or(env.message)
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(String::from)
                        .unwrap_or(body)
                });
            warn!("Provider responded with {}: {}", status, message);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;
        if envelope.success == Some(false) {
            let error = envelope.error.ok_or_else(|| {
                ProviderError::Decode("'success' is false but no 'error' was given".into())
            })?;
            warn!("Provider reported error {}", error.code);
            return Err(ProviderError::Api {
                code: error.code,
                kind: error.kind.unwrap_or_default(),
                info: error.info,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl RateProvider for ExchangeRatesApiClient {
    #[instrument(skip(self))]
    async fn fetch_symbols(&self) -> Result<CurrencySymbolTable, ProviderError> {
        let resp: SymbolsResponse = self.get(&self.symbols_url(), &[]).await?;
        debug!("Fetched {} currency symbols", resp.symbols.len());
        Ok(resp.symbols)
    }

    #[instrument(skip(self))]
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot, ProviderError> {
        self.get(&self.latest_url(), &[("base", base)]).await
    }

    #[instrument(skip(self))]
    async fn fetch_historical(
        &self,
        date: NaiveDate,
        base: &str,
    ) -> Result<RateSnapshot, ProviderError> {
        self.get(&self.historical_url(date), &[("base", base)])
            .await
    }

    fn endpoint(&self) -> String {
        self.symbols_url()
    }
}
