//! Command-line arguments for `fiatconv`.
use std::time::Duration;

use clap::Parser;
use rust_decimal::Decimal;

use crate::config::{Config, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::exchange_rate::SymbolsMode;

/// Converts an amount between ISO 4217 currencies using the latest exchange rate.
#[derive(Debug, Parser)]
#[command(name = "fiatconv", version, about, long_about = None, allow_negative_numbers = true)]
pub struct Cli {
    /// Decimal amount of source currency
    #[arg(value_name = "AMOUNT")]
    pub amount: Decimal,

    /// ISO currency code of source currency
    #[arg(value_name = "SRC")]
    pub src: String,

    /// ISO currency code of destination currency
    #[arg(value_name = "DST")]
    pub dst: String,

    /// Exchange API address
    #[arg(long, env = "FIATCONV_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Optional proxy URL, e.g. http://proxy.local:3128
    #[arg(long, env = "FIATCONV_PROXY")]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "FIATCONV_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Also ask the API for the source currency (`symbols=SRC,DST`)
    #[arg(long)]
    pub include_base_symbol: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            proxy: self.proxy.clone(),
            timeout: Duration::from_secs(self.timeout),
            symbols: if self.include_base_symbol {
                SymbolsMode::BaseAndTarget
            } else {
                SymbolsMode::Target
            },
        }
    }
}
