//! Rate Handler
//!
//! Mediates between currency/rate queries and the rate provider.
//! Owns the per-instance caches and the one recoverable failure: a provider
//! that refuses to change the base currency.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use fxrates_client::{ExchangeRatesApiClient, ProviderConfig};
use fxrates_types::{
    CurrencyCode, CurrencySymbolTable, Decimal, ProviderError, RateError, RateProvider,
    RateSnapshot, ValidatedSnapshot,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Which provider endpoint a snapshot comes from.
#[derive(Debug, Clone, Copy)]
enum SnapshotRequest {
    Latest,
    Historical(NaiveDate),
}

/// Rate handler for one provider integration.
///
/// Generic over `P: RateProvider` - the provider is injected at compile time.
///
/// The symbol table and the latest-rates snapshot are each fetched at most
/// once per instance. Once a snapshot is cached it answers every query,
/// whatever base the query asks for.
pub struct RateHandler<P: RateProvider> {
    provider: P,
    currencies: Mutex<Option<Arc<CurrencySymbolTable>>>,
    rates: Mutex<Option<Arc<ValidatedSnapshot>>>,
}

impl RateHandler<ExchangeRatesApiClient> {
    /// Creates a handler backed by the exchangeratesapi.io client.
    pub fn from_config(config: ProviderConfig) -> Result<Self, RateError> {
        Ok(Self::new(ExchangeRatesApiClient::new(config)?))
    }

    /// Creates a handler from the provider access key alone.
    ///
    /// Fails with a configuration error if the key is missing.
    pub fn from_api_key(api_key: Option<String>) -> Result<Self, RateError> {
        Self::from_config(ProviderConfig::new(api_key)?)
    }
}

impl<P: RateProvider> RateHandler<P> {
    pub const NAME: &'static str = "ExchangeRatesApi";

    /// Base used when the provider refuses the requested one.
    pub const DEFAULT_BASE: &'static str = "USD";

    /// Creates a new handler with empty caches.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            currencies: Mutex::new(None),
            rates: Mutex::new(None),
        }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn endpoint(&self) -> String {
        self.provider.endpoint()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Symbols
    // ─────────────────────────────────────────────────────────────────────────────

    async fn currencies(&self) -> Result<Arc<CurrencySymbolTable>, RateError> {
        let mut cached = self.currencies.lock().await;
        if let Some(table) = cached.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.provider.fetch_symbols().await?);
        info!("{}: cached {} currency symbols", Self::NAME, table.len());
        *cached = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Returns every 3-letter ISO 4217 code the provider knows.
    pub async fn get_all_currency_codes(&self) -> Result<BTreeSet<CurrencyCode>, RateError> {
        Ok(self.currencies().await?.codes().cloned().collect())
    }

    /// Returns the currency name for `code`.
    pub async fn get_currency_name(&self, code: &str) -> Result<String, RateError> {
        self.currencies()
            .await?
            .name(code)
            .map(String::from)
            .ok_or_else(|| RateError::UnknownCurrency(code.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the cached snapshot, fetching it for `base` on first use.
    ///
    /// The lock is held across the fetch so concurrent first queries share
    /// a single provider round-trip.
    async fn latest_rates(&self, base: &str) -> Result<Arc<ValidatedSnapshot>, RateError> {
        let mut cached = self.rates.lock().await;
        if let Some(snapshot) = cached.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = Arc::new(
            self.fetch_with_fallback(SnapshotRequest::Latest, base)
                .await?,
        );
        info!(
            "{}: cached rates for base {} ({} currencies)",
            Self::NAME,
            snapshot.base(),
            snapshot.snapshot().rates.len()
        );
        *cached = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Returns the capture time of the active snapshot, if the provider gave one.
    ///
    /// `_code` does not affect the result; every code shares one snapshot.
    pub async fn get_rate_timestamp(
        &self,
        base: &str,
        _code: &str,
    ) -> Result<Option<DateTime<Utc>>, RateError> {
        Ok(self.latest_rates(base).await?.timestamp())
    }

    /// Returns how many units of `code` equal one unit of `base`.
    pub async fn get_rate_factor(&self, base: &str, code: &str) -> Result<Decimal, RateError> {
        self.latest_rates(base).await?.rate_factor(base, code)
    }

    /// Returns the base of the active snapshot.
    pub async fn base(&self) -> Result<CurrencyCode, RateError> {
        self.rates
            .lock()
            .await
            .as_ref()
            .map(|snapshot| snapshot.base().clone())
            .ok_or(RateError::NoActiveSnapshot)
    }

    /// Returns the active snapshot without triggering a fetch.
    pub async fn snapshot(&self) -> Option<Arc<ValidatedSnapshot>> {
        self.rates.lock().await.clone()
    }

    /// Returns the factor of `code` relative to `base` as published on `date`.
    ///
    /// Historical snapshots are not cached and do not replace the active one.
    pub async fn get_historical_rate_factor(
        &self,
        date: NaiveDate,
        base: &str,
        code: &str,
    ) -> Result<Decimal, RateError> {
        self.fetch_with_fallback(SnapshotRequest::Historical(date), base)
            .await?
            .rate_factor(base, code)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Fetch & Fallback
    // ─────────────────────────────────────────────────────────────────────────────

    async fn fetch(
        &self,
        request: SnapshotRequest,
        base: &str,
    ) -> Result<RateSnapshot, ProviderError> {
        match request {
            SnapshotRequest::Latest => self.provider.fetch_latest(base).await,
            SnapshotRequest::Historical(date) => self.provider.fetch_historical(date, base).await,
        }
    }

    /// Fetches a snapshot for `base`, retrying once with the default base if
    /// the provider plan forbids changing it. Any other error is returned as-is.
    async fn fetch_with_fallback(
        &self,
        request: SnapshotRequest,
        base: &str,
    ) -> Result<ValidatedSnapshot, RateError> {
        debug!("{}: fetching {:?} rates for base {}", Self::NAME, request, base);

        let (snapshot, requested) = match self.fetch(request, base).await {
            Ok(snapshot) => (snapshot, base),
            Err(err) if err.is_forbidden() && base != Self::DEFAULT_BASE => {
                warn!(
                    "{}: base {} refused ({}), retrying with {}",
                    Self::NAME,
                    base,
                    err,
                    Self::DEFAULT_BASE
                );
                let snapshot = self.fetch(request, Self::DEFAULT_BASE).await?;
                (snapshot, Self::DEFAULT_BASE)
            }
            Err(err) => return Err(err.into()),
        };

        let (validated, warnings) = snapshot.validate(requested)?;
        for warning in &warnings {
            warn!("{}: {}", Self::NAME, warning);
        }
        Ok(validated)
    }
}
