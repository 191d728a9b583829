//! Rate snapshots and cross-rate computation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::currency::CurrencyCode;
use crate::error::RateError;

/// One provider response to a latest or historical rates request.
///
/// `rates[x]` is the number of units of `x` that equal one unit of `base`.
/// Every field is optional on the wire; [`RateSnapshot::validate`] decides
/// what is fatal and what is only worth a warning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Base the provider actually used, which may differ from the requested one.
    #[serde(default)]
    pub base: Option<CurrencyCode>,
    /// Provider-reported capture time (unix seconds on the wire).
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub rates: BTreeMap<CurrencyCode, Decimal>,
}

/// Non-fatal inconsistencies found while validating a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotWarning {
    /// The response carried no `base` field.
    MissingBase { assumed: CurrencyCode },
    /// The provider answered with a different base than requested.
    BaseMismatch {
        requested: CurrencyCode,
        reported: CurrencyCode,
    },
    /// The base currency is not listed in its own rates.
    BaseNotInRates { base: CurrencyCode },
    /// The base currency maps to something other than exactly 1.
    BaseRateNotOne { base: CurrencyCode, rate: Decimal },
}

impl fmt::Display for SnapshotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotWarning::MissingBase { assumed } => {
                write!(f, "'base' not found in results, assuming {}", assumed)
            }
            SnapshotWarning::BaseMismatch {
                requested,
                reported,
            } => write!(f, "requested base {} but provider used {}", requested, reported),
            SnapshotWarning::BaseNotInRates { base } => {
                write!(f, "base {} not found in rates", base)
            }
            SnapshotWarning::BaseRateNotOne { base, rate } => {
                write!(f, "base {} maps to {} instead of 1", base, rate)
            }
        }
    }
}

impl RateSnapshot {
    /// Returns the factor listed for `code`.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Validates the snapshot against the base it was requested with.
    ///
    /// Empty rates are fatal. Every base inconsistency is reported as a
    /// warning and the snapshot is kept as-is; a missing `base` is replaced
    /// by `requested`.
    pub fn validate(
        self,
        requested: &str,
    ) -> Result<(ValidatedSnapshot, Vec<SnapshotWarning>), RateError> {
        if self.rates.is_empty() {
            return Err(RateError::InvalidSnapshot(
                "'rates' not found in results".into(),
            ));
        }

        let mut warnings = Vec::new();
        let requested = CurrencyCode::new(requested);

        let base = match &self.base {
            Some(reported) => {
                if *reported != requested {
                    warnings.push(SnapshotWarning::BaseMismatch {
                        requested,
                        reported: reported.clone(),
                    });
                }
                reported.clone()
            }
            None => {
                warnings.push(SnapshotWarning::MissingBase {
                    assumed: requested.clone(),
                });
                requested
            }
        };

        match self.rate(base.as_str()) {
            None => warnings.push(SnapshotWarning::BaseNotInRates { base: base.clone() }),
            Some(rate) if rate != Decimal::ONE => warnings.push(SnapshotWarning::BaseRateNotOne {
                base: base.clone(),
                rate,
            }),
            Some(_) => {}
        }

        Ok((
            ValidatedSnapshot {
                base,
                snapshot: self,
            },
            warnings,
        ))
    }
}

/// A snapshot that passed validation, with its effective base resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSnapshot {
    base: CurrencyCode,
    snapshot: RateSnapshot,
}

impl ValidatedSnapshot {
    /// The base every rate in this snapshot is expressed against.
    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.snapshot.timestamp
    }

    pub fn snapshot(&self) -> &RateSnapshot {
        &self.snapshot
    }

    /// Returns how many units of `code` equal one unit of `base`.
    ///
    /// When `base` is not the snapshot's own base the factor is derived as
    /// `rates[code] / rates[base]`, which cancels the common base.
    pub fn rate_factor(&self, base: &str, code: &str) -> Result<Decimal, RateError> {
        let factor = self
            .snapshot
            .rate(code)
            .ok_or_else(|| RateError::RateNotFound(code.to_string()))?;

        if base == self.base.as_str() {
            return Ok(factor);
        }

        let divisor = self
            .snapshot
            .rate(base)
            .ok_or_else(|| RateError::RateNotFound(base.to_string()))?;

        factor.checked_div(divisor).ok_or_else(|| {
            RateError::InvalidSnapshot(format!(
                "cannot derive {} relative to {} (rate {})",
                code, base, divisor
            ))
        })
    }
}
