use async_trait::async_trait;
use crate::types::{Article, Quote};
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch the current articles, most recent per feed first
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Returns the price string for `symbol`, or "N/A" when it cannot be retrieved
    async fn fetch_quote(&self, symbol: &str) -> String;

    /// Fetch quotes one symbol at a time, preserving order
    async fn fetch_quotes(&self, symbols: &[String]) -> Vec<Quote> {
        let mut quotes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let price = self.fetch_quote(symbol).await;
            quotes.push(Quote::new(symbol.clone(), price));
        }
        quotes
    }
}
