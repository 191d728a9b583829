//! Domain models for exchange rate data.

pub mod currency;
pub mod snapshot;

pub use currency::{CurrencyCode, CurrencySymbolTable};
pub use snapshot::{RateSnapshot, SnapshotWarning, ValidatedSnapshot};
