use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::currency::CurrencyCode;
use crate::error::{ConvertError, Result};

/// Body of a `latest` response.
#[derive(Debug, Deserialize, PartialEq)]
pub struct LatestRates {
    pub rates: HashMap<String, Decimal>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl LatestRates {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// The rate quoted for `code`. Values finer than 28 decimal places are
    /// rounded on decode, so a quote that rounds to zero is rejected along
    /// with zero and negative quotes.
    pub fn rate_for(&self, code: &CurrencyCode) -> Result<Decimal> {
        let rate = self
            .rates
            .get(code.as_str())
            .copied()
            .ok_or(ConvertError::RateNotFound(*code))?;
        if rate <= Decimal::ZERO {
            return Err(ConvertError::InvalidRate { code: *code, rate });
        }

        Ok(rate)
    }
}
