//! Currency codes and the provider's symbol table.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// A 3-letter ISO 4217 currency code as reported by the provider.
///
/// Values decoded from provider responses are taken as-is. Values typed by a
/// user go through [`FromStr`](std::str::FromStr), which upper-cases and
/// checks the shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Wraps a code without validating it.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for CurrencyCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(format!("Invalid currency code: {}", s))
        }
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Mapping from currency code to the provider's human-readable name.
///
/// Fetched once per handler and never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencySymbolTable(BTreeMap<CurrencyCode, String>);

impl CurrencySymbolTable {
    pub fn new(symbols: BTreeMap<CurrencyCode, String>) -> Self {
        Self(symbols)
    }

    /// Returns the name registered for `code`, if any.
    pub fn name(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    /// Iterates over all codes in alphabetical order.
    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &str)> {
        self.0.iter().map(|(code, name)| (code, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CurrencyCode, String)> for CurrencySymbolTable {
    fn from_iter<T: IntoIterator<Item = (CurrencyCode, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
