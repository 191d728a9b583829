//! # FX Rates Types
//!
//! Domain types and port traits for the exchange rate engine.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Currency codes, the symbol table and rate snapshots
//! - `ports/` - The `RateProvider` trait that provider adapters implement
//! - `error/` - Configuration, provider and handler error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CurrencyCode, CurrencySymbolTable, RateSnapshot, SnapshotWarning, ValidatedSnapshot,
};
pub use error::{ConfigError, ProviderError, RateError};
pub use ports::RateProvider;
pub use rust_decimal::Decimal;
