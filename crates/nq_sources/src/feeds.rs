use std::fmt;
use std::str::FromStr;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use nq_core::{Article, ArticleSource, Category, Error, Result};
use crate::config::{http_client, SourcesConfig};
use crate::logging::Logger;
use crate::scrapers::utils;

/// Items taken from the top of each feed
pub const DEFAULT_PER_FEED_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSpec {
    pub category: Category,
    pub url: String,
}

impl FeedSpec {
    pub fn new(category: Category, url: impl Into<String>) -> Self {
        Self {
            category,
            url: url.into(),
        }
    }
}

impl fmt::Display for FeedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.category, self.url)
    }
}

/// Parses `category=url`, e.g. `finance=https://example.com/rss.xml`.
impl FromStr for FeedSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (category, url) = s
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("Invalid feed '{}'. Expected: category=url", s)))?;
        let category = category.parse::<Category>()?;
        let url = utils::parse_url(url.trim())?;
        Ok(Self::new(category, url.to_string()))
    }
}

pub fn default_feeds() -> Vec<FeedSpec> {
    vec![
        FeedSpec::new(Category::Finance, "https://www.financialexpress.com/feed/"),
        FeedSpec::new(Category::Finance, "https://www.moneycontrol.com/rss/MCtopnews.xml"),
        FeedSpec::new(Category::Geopolitics, "https://www.aljazeera.com/xml/rss/all.xml"),
        FeedSpec::new(Category::Geopolitics, "https://rss.nytimes.com/services/xml/rss/nyt/World.xml"),
    ]
}

/// Turns an RSS 2.0 document into at most `limit` articles, in feed order.
pub fn parse_feed(bytes: &[u8], category: Category, limit: usize) -> Result<Vec<Article>> {
    let channel = rss::Channel::read_from(bytes)
        .map_err(|e| Error::Feed(format!("Failed to parse RSS: {}", e)))?;

    Ok(channel
        .items()
        .iter()
        .take(limit)
        .map(|item| Article {
            title: item.title().unwrap_or_default().trim().to_string(),
            raw_text: item.description().map(utils::html_to_text).unwrap_or_default(),
            link: item.link().unwrap_or_default().trim().to_string(),
            category,
            published_at: item.pub_date().and_then(parse_pub_date),
        })
        .collect())
}

fn parse_pub_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

pub struct RssArticleSource {
    client: Client,
    feeds: Vec<FeedSpec>,
    per_feed_limit: usize,
}

impl fmt::Debug for RssArticleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RssArticleSource")
            .field("client", &"<reqwest::Client>")
            .field("feeds", &self.feeds)
            .field("per_feed_limit", &self.per_feed_limit)
            .finish()
    }
}

impl RssArticleSource {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            feeds: config.feeds.clone(),
            per_feed_limit: config.per_feed_limit,
        })
    }

    async fn fetch_feed(&self, feed: &FeedSpec) -> Result<Vec<Article>> {
        let bytes = self.client
            .get(&feed.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        parse_feed(&bytes, feed.category, self.per_feed_limit)
    }
}

#[async_trait]
impl ArticleSource for RssArticleSource {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let mut articles = Vec::new();
        for feed in &self.feeds {
            let logger = Logger::new().with_prefix(format!("[{}]", feed.category));
            match self.fetch_feed(feed).await {
                Ok(found) => {
                    logger.info(&format!("📰 {} articles from {}", found.len(), feed.url));
                    articles.extend(found);
                }
                Err(e) => logger.warn(&format!("⚠️ Skipping feed {}: {}", feed.url, e)),
            }
        }
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Markets</title>
    <link>https://example.com</link>
    <description>Top stories</description>
    <item>
      <title>Sensex jumps 500 points</title>
      <link>https://example.com/sensex</link>
      <description><![CDATA[<p>Benchmarks rose on <b>strong</b> buying.</p>]]></description>
      <pubDate>Mon, 13 May 2024 10:15:00 +0530</pubDate>
    </item>
    <item>
      <title>Rupee steady</title>
      <link>https://example.com/rupee</link>
    </item>
    <item><title>Third</title><link>https://example.com/3</link><description>three</description></item>
    <item><title>Fourth</title><link>https://example.com/4</link><description>four</description></item>
    <item><title>Fifth</title><link>https://example.com/5</link><description>five</description></item>
    <item><title>Sixth</title><link>https://example.com/6</link><description>six</description></item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed() {
        let articles = parse_feed(FEED.as_bytes(), Category::Finance, DEFAULT_PER_FEED_LIMIT).unwrap();
        assert_eq!(articles.len(), 5);

        let first = &articles[0];
        assert_eq!(first.title, "Sensex jumps 500 points");
        assert_eq!(first.raw_text, "Benchmarks rose on strong buying.");
        assert_eq!(first.link, "https://example.com/sensex");
        assert_eq!(first.category, Category::Finance);
        assert_eq!(
            first.published_at.unwrap().to_rfc3339(),
            "2024-05-13T04:45:00+00:00"
        );

        assert_eq!(articles[1].raw_text, "");
        assert_eq!(articles[1].effective_input(), "Rupee steady");
        assert!(articles[1].published_at.is_none());
        assert_eq!(articles[4].title, "Fifth");
    }

    #[test]
    fn test_parse_feed_separates_paragraphs() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Markets</title>
    <link>https://example.com</link>
    <description>Top stories</description>
    <item>
      <title>Closing bell</title>
      <description><![CDATA[<p>Sensex rose 500 points.</p><p>Nifty closed higher.</p>Rupee<br/>firmed]]></description>
    </item>
    <item>
      <title>Escaped markup</title>
      <description>&lt;p&gt;a&lt;/p&gt;&lt;p&gt;b&lt;/p&gt;x&lt;br/&gt;y</description>
    </item>
  </channel>
</rss>"#;
        let articles = parse_feed(feed.as_bytes(), Category::Finance, DEFAULT_PER_FEED_LIMIT).unwrap();

        assert_eq!(articles[0].raw_text, "Sensex rose 500 points. Nifty closed higher. Rupee firmed");
        assert_eq!(articles[1].raw_text, "a b x y");
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        let err = parse_feed(b"<html>not a feed</html>", Category::Geopolitics, 5).unwrap_err();
        assert!(matches!(err, Error::Feed(_)));
    }

    #[test]
    fn test_feed_spec_parsing() {
        let spec: FeedSpec = "geopolitics=https://example.com/world.xml".parse().unwrap();
        assert_eq!(spec.category, Category::Geopolitics);
        assert_eq!(spec.url, "https://example.com/world.xml");
        assert_eq!(spec.to_string(), "geopolitics=https://example.com/world.xml");

        assert!("https://example.com/world.xml".parse::<FeedSpec>().is_err());
        assert!("sports=https://example.com".parse::<FeedSpec>().is_err());
        assert!("finance=not-a-url".parse::<FeedSpec>().is_err());
    }

    #[test]
    fn test_default_feeds() {
        let feeds = default_feeds();
        assert_eq!(feeds.len(), 4);
        assert_eq!(feeds.iter().filter(|f| f.category == Category::Finance).count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_skipped() {
        let config = SourcesConfig {
            feeds: vec![FeedSpec::new(Category::Finance, "http://127.0.0.1:9/feed.xml")],
            timeout: Duration::from_secs(2),
            ..SourcesConfig::default()
        };
        let source = RssArticleSource::new(&config).unwrap();
        let articles = source.fetch_articles().await.unwrap();
        assert!(articles.is_empty());
    }
}
