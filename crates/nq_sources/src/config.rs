use std::time::Duration;
use crate::feeds::{default_feeds, FeedSpec, DEFAULT_PER_FEED_LIMIT};
use crate::scrapers::google_finance::{default_symbols, DEFAULT_BASE_URL, DEFAULT_EXCHANGE};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_ARTICLES: usize = 10;
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub feeds: Vec<FeedSpec>,
    pub per_feed_limit: usize,
    /// Articles shown on the dashboard, across all feeds
    pub max_articles: usize,
    pub symbols: Vec<String>,
    pub exchange: String,
    pub quote_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            per_feed_limit: DEFAULT_PER_FEED_LIMIT,
            max_articles: DEFAULT_MAX_ARTICLES,
            symbols: default_symbols(),
            exchange: DEFAULT_EXCHANGE.to_string(),
            quote_base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

pub(crate) fn http_client(config: &SourcesConfig) -> nq_core::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()?)
}
