//! Error types for the exchange rate engine.

/// Configuration errors detected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing provider access key: set EXCHANGE_RATES_API_KEY to your exchangeratesapi.io access key")]
    MissingApiKey,

    #[error("Invalid provider base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request timeout must be greater than zero")]
    InvalidTimeout,
}

/// Provider-level errors (transport, HTTP and payload failures).
///
/// Carries the HTTP status or provider error code so callers can tell a
/// plan restriction apart from every other failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("API error: {code} {kind}")]
    Api {
        code: u16,
        kind: String,
        info: Option<String>,
    },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ProviderError {
    /// HTTP status reported for plan restrictions.
    pub const FORBIDDEN_STATUS: u16 = 403;
    /// Provider error code for "base_currency_access_restricted".
    pub const BASE_RESTRICTED_CODE: u16 = 105;

    /// Returns true if the provider refused the request because the plan
    /// does not allow changing the base currency.
    pub fn is_forbidden(&self) -> bool {
        match self {
            ProviderError::Status { status, .. } => *status == Self::FORBIDDEN_STATUS,
            ProviderError::Api { code, .. } => *code == Self::BASE_RESTRICTED_CODE,
            _ => false,
        }
    }

    /// Returns the HTTP status, if the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Handler-level errors surfaced to the host application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Rate not found: {0}")]
    RateNotFound(String),

    #[error("No active rate snapshot")]
    NoActiveSnapshot,

    #[error("Invalid rate snapshot: {0}")]
    InvalidSnapshot(String),
}
