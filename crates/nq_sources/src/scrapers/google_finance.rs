use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use nq_core::{Error, QuoteSource, Result, QUOTE_UNAVAILABLE};
use tracing::{debug, warn};
use crate::config::{http_client, SourcesConfig};
use super::utils;

pub const DEFAULT_BASE_URL: &str = "https://www.google.com/finance";
pub const DEFAULT_EXCHANGE: &str = "NSE";
pub const PRICE_SELECTOR: &str = "div.YMlKec.fxKbKc";

pub fn default_symbols() -> Vec<String> {
    ["INFY", "TCS", "RELIANCE", "HDFCBANK", "ICICIBANK"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Ticker symbols are short codes; anything else is not worth a request.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol.len() <= 20
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '&' | '_'))
}

/// Price text from a Google Finance quote page.
pub fn extract_price(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    utils::extract_text(&document, PRICE_SELECTOR)
        .ok()
        .map(|price| price.trim().to_string())
        .filter(|price| !price.is_empty())
}

/// Best-effort quote scraper; the page markup is not under our control.
#[derive(Debug, Clone)]
pub struct GoogleFinanceQuoteSource {
    client: Client,
    base_url: String,
    exchange: String,
}

impl GoogleFinanceQuoteSource {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        utils::parse_url(&config.quote_base_url)?;
        Ok(Self {
            client: http_client(config)?,
            base_url: config.quote_base_url.trim_end_matches('/').to_string(),
            exchange: config.exchange.clone(),
        })
    }

    pub fn quote_url(&self, symbol: &str) -> String {
        format!("{}/quote/{}:{}", self.base_url, symbol.to_uppercase(), self.exchange)
    }

    async fn scrape_price(&self, symbol: &str) -> Result<String> {
        let url = self.quote_url(symbol);
        debug!("Fetching quote page {}", url);
        let html = self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_price(&html)
            .ok_or_else(|| Error::Scraping(format!("No price found on {}", url)))
    }
}

#[async_trait]
impl QuoteSource for GoogleFinanceQuoteSource {
    async fn fetch_quote(&self, symbol: &str) -> String {
        let symbol = symbol.trim();
        if !is_valid_symbol(symbol) {
            warn!("⚠️ Malformed symbol '{}'", symbol);
            return QUOTE_UNAVAILABLE.to_string();
        }

        match self.scrape_price(symbol).await {
            Ok(price) => price,
            Err(e) => {
                warn!("⚠️ Quote for {} unavailable: {}", symbol, e);
                QUOTE_UNAVAILABLE.to_string()
            }
        }
    }
}
