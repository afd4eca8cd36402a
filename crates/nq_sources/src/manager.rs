use std::fmt;
use std::sync::Arc;
use chrono::Utc;
use nq_core::{ArticleSource, Dashboard, Quote, QuoteSource, Result, SummaryResult};
use nq_inference::SummarizationPipeline;
use tracing::info;
use crate::config::{SourcesConfig, DEFAULT_MAX_ARTICLES};
use crate::feeds::RssArticleSource;
use crate::logging::Logger;
use crate::scrapers::google_finance::{default_symbols, GoogleFinanceQuoteSource};

/// Drives both pipelines: articles through the summarizer, symbols through the quote source.
pub struct DashboardManager {
    articles: Arc<dyn ArticleSource>,
    quotes: Arc<dyn QuoteSource>,
    pipeline: SummarizationPipeline,
    max_articles: usize,
    symbols: Vec<String>,
}

impl fmt::Debug for DashboardManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardManager")
            .field("pipeline", &self.pipeline)
            .field("max_articles", &self.max_articles)
            .field("symbols", &self.symbols)
            .finish()
    }
}

impl DashboardManager {
    pub fn new(
        articles: Arc<dyn ArticleSource>,
        quotes: Arc<dyn QuoteSource>,
        pipeline: SummarizationPipeline,
    ) -> Self {
        Self {
            articles,
            quotes,
            pipeline,
            max_articles: DEFAULT_MAX_ARTICLES,
            symbols: default_symbols(),
        }
    }

    /// RSS feeds and Google Finance, configured from `config`.
    pub fn from_config(config: &SourcesConfig, pipeline: SummarizationPipeline) -> Result<Self> {
        let articles = Arc::new(RssArticleSource::new(config)?);
        let quotes = Arc::new(GoogleFinanceQuoteSource::new(config)?);
        Ok(Self::new(articles, quotes, pipeline)
            .with_max_articles(config.max_articles)
            .with_symbols(config.symbols.clone()))
    }

    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = symbols;
        self
    }

    pub async fn summarize_text(&self, text: &str) -> Result<String> {
        self.pipeline.summarize(text).await
    }

    /// One result per article, in retrieval order, capped at `max_articles`.
    pub async fn collect_summaries(&self) -> Result<Vec<SummaryResult>> {
        let articles = self.articles.fetch_articles().await?;
        let total = articles.len().min(self.max_articles);
        info!("📰 Summarizing {} articles", total);

        let mut results = Vec::with_capacity(total);
        for (i, article) in articles.into_iter().take(total).enumerate() {
            let logger = Logger::new()
                .with_prefix(format!("[{}]", article.category))
                .with_prefix(format!("[{}/{}]", i + 1, total));
            logger.debug(&format!("🤖 Summarizing: {}", article.title));

            let result = self.pipeline.summarize_article(article).await;
            if result.is_fallback() {
                logger.warn("Showing title instead of summary");
            } else {
                logger.info(&format!("✨ {}", result.article.title));
            }
            results.push(result);
        }
        Ok(results)
    }

    pub async fn collect_quotes(&self) -> Vec<Quote> {
        info!("📈 Fetching {} quotes", self.symbols.len());
        let quotes = self.quotes.fetch_quotes(&self.symbols).await;
        let missing = quotes.iter().filter(|q| !q.is_available()).count();
        if missing > 0 {
            Logger::new()
                .with_prefix("[quotes]".to_string())
                .warn(&format!("{} of {} quotes unavailable", missing, quotes.len()));
        }
        quotes
    }

    pub async fn build_dashboard(&self) -> Result<Dashboard> {
        let summaries = self.collect_summaries().await?;
        let quotes = self.collect_quotes().await;
        Ok(Dashboard {
            summaries,
            quotes,
            generated_at: Utc::now(),
        })
    }
}
