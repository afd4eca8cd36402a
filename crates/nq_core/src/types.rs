use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::Error;

/// Placeholder shown for a quote that could not be retrieved.
pub const QUOTE_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Finance,
    Geopolitics,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Finance => "finance",
            Category::Geopolitics => "geopolitics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "finance" => Ok(Category::Finance),
            "geopolitics" => Ok(Category::Geopolitics),
            other => Err(Error::Config(format!("Unknown category: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Feed-provided summary or body. May be empty.
    pub raw_text: String,
    pub link: String,
    pub category: Category,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(title: impl Into<String>, raw_text: impl Into<String>, link: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            raw_text: raw_text.into(),
            link: link.into(),
            category,
            published_at: None,
        }
    }

    /// Text handed to the summarizer: the raw text, or the title when the raw text is empty.
    pub fn effective_input(&self) -> &str {
        if self.raw_text.is_empty() {
            &self.title
        } else {
            &self.raw_text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SummaryStatus {
    Generated,
    /// Summarization failed; `summary_text` holds the article title instead.
    Fallback { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub article: Article,
    pub summary_text: String,
    pub status: SummaryStatus,
}

impl SummaryResult {
    pub fn generated(article: Article, summary_text: String) -> Self {
        Self {
            article,
            summary_text,
            status: SummaryStatus::Generated,
        }
    }

    pub fn fallback(article: Article, error: String) -> Self {
        let summary_text = article.title.clone();
        Self {
            article,
            summary_text,
            status: SummaryStatus::Fallback { error },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.status, SummaryStatus::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: String,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
        }
    }

    pub fn unavailable(symbol: impl Into<String>) -> Self {
        Self::new(symbol, QUOTE_UNAVAILABLE)
    }

    pub fn is_available(&self) -> bool {
        self.price != QUOTE_UNAVAILABLE
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub summaries: Vec<SummaryResult>,
    pub quotes: Vec<Quote>,
    pub generated_at: DateTime<Utc>,
}
