//! Exchange rate provider port.
//!
//! This trait defines the interface for remote rate providers.
//! Implementations can be HTTP clients, mock providers, etc.

use chrono::NaiveDate;

use crate::domain::{CurrencySymbolTable, RateSnapshot};
use crate::error::ProviderError;

/// Port trait for exchange rate providers.
///
/// Implementations hold no domain state; every call is one round-trip.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the full list of supported currency codes and their names.
    async fn fetch_symbols(&self) -> Result<CurrencySymbolTable, ProviderError>;

    /// Fetches the latest rates expressed against `base`.
    ///
    /// Providers may refuse a non-default base; see [`ProviderError::is_forbidden`].
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot, ProviderError>;

    /// Fetches the rates published for `date`, expressed against `base`.
    async fn fetch_historical(
        &self,
        date: NaiveDate,
        base: &str,
    ) -> Result<RateSnapshot, ProviderError>;

    /// Identifies this provider integration (the symbols endpoint URL).
    fn endpoint(&self) -> String;
}
