use std::fmt;

use log::debug;
use rust_decimal::Decimal;

use crate::currency::CurrencyCode;
use crate::error::{ConvertError, Result};
use crate::exchange_rate::RateFetcher;

/// A validated conversion: `amount` units of `source` into `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

impl ConversionRequest {
    /// Validates both codes, source first.
    pub fn new(amount: Decimal, source: &str, target: &str) -> Result<Self> {
        Ok(Self {
            amount,
            source: CurrencyCode::parse(source)?,
            target: CurrencyCode::parse(target)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionResult {
    pub request: ConversionRequest,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {}",
            self.request.source, self.request.amount, self.request.target, self.amount
        )
    }
}

/// `amount * rate`, unrounded. Panics if the product overflows `Decimal`;
/// see [`checked_convert`].
pub fn convert(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

/// `amount * rate`, or `None` when the product doesn't fit in a `Decimal`.
pub fn checked_convert(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate)
}

pub async fn convert_currency<F>(fetcher: &F, request: &ConversionRequest) -> Result<ConversionResult>
where
    F: RateFetcher + ?Sized,
{
    let rate = fetcher.fetch_rate(&request.source, &request.target).await?;
    debug!("{} -> {} rate is {}", request.source, request.target, rate);

    let amount = checked_convert(request.amount, rate).ok_or(ConvertError::Overflow {
        amount: request.amount,
        rate,
    })?;

    Ok(ConversionResult {
        request: *request,
        rate,
        amount,
    })
}

/// Validates raw input and converts it. Invalid codes never reach `fetcher`.
pub async fn convert_input<F>(
    fetcher: &F,
    amount: Decimal,
    source: &str,
    target: &str,
) -> Result<ConversionResult>
where
    F: RateFetcher + ?Sized,
{
    let request = ConversionRequest::new(amount, source, target)?;
    convert_currency(fetcher, &request).await
}
