//! Converts money between ISO 4217 currencies using the latest rate from an
//! exchangeratesapi.io style service.

pub mod cli;
pub mod config;
pub mod converter;
pub mod currency;
pub mod error;
pub mod exchange_rate;
pub mod latest_rates;

pub use config::Config;
pub use converter::{
    ConversionRequest, ConversionResult, checked_convert, convert, convert_currency, convert_input,
};
pub use currency::CurrencyCode;
pub use error::ConvertError;
pub use exchange_rate::{ExchangeRateClient, RateFetcher, SymbolsMode};
