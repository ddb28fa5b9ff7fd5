use reqwest::StatusCode;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::currency::CurrencyCode;

/// Every way a conversion can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("invalid proxy URL {url:?}: {reason}")]
    InvalidProxyUrl { url: String, reason: String },

    #[error("invalid API URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("can't build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("exchange API request failed")]
    Network(#[source] reqwest::Error),

    #[error("exchange API returned {0}")]
    UnexpectedStatus(StatusCode),

    #[error("can't decode exchange API response")]
    Decode(#[from] serde_json::Error),

    #[error("exchange rate for {0} not found")]
    RateNotFound(CurrencyCode),

    #[error("exchange rate for {code} must be positive, got {rate}")]
    InvalidRate { code: CurrencyCode, rate: Decimal },

    #[error("{amount} * {rate} overflows")]
    Overflow { amount: Decimal, rate: Decimal },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
