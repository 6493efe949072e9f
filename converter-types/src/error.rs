//! Error types for the conversion service.

use exchange_rates::{CurrencyCode, ExchangeError};

/// Business failures of a conversion request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Exchange rate data unavailable")]
    RatesUnavailable,

    #[error("Currency conversion rate not found for {from} -> {to}")]
    RateNotFound { from: CurrencyCode, to: CurrencyCode },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl From<ExchangeError> for ConvertError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::UnsupportedCurrency(symbol) => ConvertError::InvalidCurrency(symbol),
            ExchangeError::RateNotFound(from, to) => ConvertError::RateNotFound { from, to },
        }
    }
}

/// Cache store failures (as opposed to an empty or expired entry).
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache store unavailable: {0}")]
    Unavailable(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

/// Upstream rate fetch failures.
///
/// The variants only matter for logs; callers see every one of them as
/// [`ConvertError::RatesUnavailable`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Upstream responded with status {0}")]
    Status(u16),

    #[error("Malformed rate payload: {0}")]
    Payload(String),
}

impl From<FetchError> for ConvertError {
    fn from(_: FetchError) -> Self {
        ConvertError::RatesUnavailable
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::InvalidCurrency(_) => AppError::BadRequest("Invalid currency code".into()),
            ConvertError::RateNotFound { .. } => {
                AppError::BadRequest("Currency conversion rate not found".into())
            }
            ConvertError::InvalidAmount(msg) => AppError::BadRequest(msg),
            ConvertError::RatesUnavailable => {
                AppError::ServiceUnavailable("Failed to fetch exchange rates".into())
            }
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::Internal(err.to_string())
    }
}
