use std::time::Duration;

use log::debug;
use reqwest::{Client, Proxy};
use url::Url;

use crate::error::{ConvertError, Result};
use crate::exchange_rate::{ExchangeRateClient, SymbolsMode};

pub const DEFAULT_API_URL: &str = "https://api.exchangeratesapi.io";

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to talk to the exchange API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub proxy: Option<String>,
    pub timeout: Duration,
    pub symbols: SymbolsMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            symbols: SymbolsMode::default(),
        }
    }
}

impl Config {
    /// Builds the HTTP client, routing every request through `proxy` when
    /// one is set. Without a proxy the client falls back to the system
    /// proxy settings.
    pub fn build_http_client(&self) -> Result<Client> {
        let mut builder = Client::builder().timeout(self.timeout);

        if let Some(proxy) = &self.proxy {
            let proxy_url = Url::parse(proxy).map_err(|e| ConvertError::InvalidProxyUrl {
                url: proxy.clone(),
                reason: e.to_string(),
            })?;
            let proxy_cfg = Proxy::all(proxy_url).map_err(|e| ConvertError::InvalidProxyUrl {
                url: proxy.clone(),
                reason: e.to_string(),
            })?;
            debug!("Using proxy {}", proxy);
            builder = builder.proxy(proxy_cfg);
        }

        builder.build().map_err(ConvertError::ClientBuild)
    }

    pub fn exchange_client(&self) -> Result<ExchangeRateClient> {
        let client = self.build_http_client()?;
        Ok(ExchangeRateClient::new(&self.api_url, client)?.with_symbols(self.symbols))
    }
}
