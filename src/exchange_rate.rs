use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use url::Url;

use crate::currency::CurrencyCode;
use crate::error::{ConvertError, Result};
use crate::latest_rates::LatestRates;

/// Something that can look up the rate turning one unit of `base` into `target`.
#[async_trait]
pub trait RateFetcher: Send + Sync {
    async fn fetch_rate(&self, base: &CurrencyCode, target: &CurrencyCode) -> Result<Decimal>;
}

/// What goes into the `symbols` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolsMode {
    /// `symbols=<target>`
    #[default]
    Target,
    /// `symbols=<base>,<target>`
    BaseAndTarget,
}

/// Client for an exchangeratesapi.io style `latest` endpoint.
#[derive(Debug, Clone)]
pub struct ExchangeRateClient {
    api_url: Url,
    client: Client,
    symbols: SymbolsMode,
}

impl ExchangeRateClient {
    pub fn new(api_url: &str, client: Client) -> Result<Self> {
        let parsed = Url::parse(api_url).map_err(|e| ConvertError::InvalidApiUrl {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConvertError::InvalidApiUrl {
                url: api_url.to_string(),
                reason: "URL can't carry a path".to_string(),
            });
        }

        Ok(Self {
            api_url: parsed,
            client,
            symbols: SymbolsMode::default(),
        })
    }

    pub fn with_symbols(mut self, symbols: SymbolsMode) -> Self {
        self.symbols = symbols;
        self
    }

    /// `<api_url>/latest?base=<base>&symbols=<target>`. Query parameters
    /// already on the API URL (an access key, say) are kept.
    pub fn latest_url(&self, base: &CurrencyCode, target: &CurrencyCode) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("latest");
        }

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "base" && key != "symbols")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let symbols = match self.symbols {
            SymbolsMode::Target => target.to_string(),
            SymbolsMode::BaseAndTarget => format!("{},{}", base, target),
        };

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("base", base.as_str())
            .append_pair("symbols", &symbols);

        url
    }

    async fn load_latest(&self, url: Url) -> Result<LatestRates> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ConvertError::Network)?;
        if !resp.status().is_success() {
            return Err(ConvertError::UnexpectedStatus(resp.status()));
        }

        let body = resp.bytes().await.map_err(ConvertError::Network)?;
        let latest = LatestRates::from_slice(&body)?;

        Ok(latest)
    }
}

#[async_trait]
impl RateFetcher for ExchangeRateClient {
    async fn fetch_rate(&self, base: &CurrencyCode, target: &CurrencyCode) -> Result<Decimal> {
        let url = self.latest_url(base, target);
        debug!("Requesting exchange rate: {}", url);

        let latest = self.load_latest(url).await?;
        if let Some(date) = latest.date {
            info!("Exchange rates for {}: {} -> {}", date, base, target);
        }
        if let Some(quoted) = latest.base.as_deref() {
            if quoted != base.as_str() {
                warn!("Requested base {} but rates are quoted against {}", base, quoted);
            }
        }

        latest.rate_for(target)
    }
}
