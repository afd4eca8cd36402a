//! Turns article text into bounded-length summaries.
//!
//! Input is normalized (newlines become spaces) and cut to the first
//! [`MAX_INPUT_CHARS`] characters before it reaches the model. The model is
//! shared read-only between calls.

use std::fmt;
use std::sync::Arc;
use nq_core::{Article, InferenceModel, Result, SummaryOptions, SummaryResult};
use tracing::{debug, warn};

/// Inputs longer than this many characters are cut; the rest is never summarized.
pub const MAX_INPUT_CHARS: usize = 500;

/// Replaces every `\n` with a space and keeps at most [`MAX_INPUT_CHARS`] characters.
pub fn prepare_input(text: &str) -> String {
    let normalized = text.replace('\n', " ");
    match normalized.char_indices().nth(MAX_INPUT_CHARS) {
        Some((end, _)) => normalized[..end].to_string(),
        None => normalized,
    }
}

#[derive(Clone)]
pub struct SummarizationPipeline {
    model: Arc<dyn InferenceModel>,
    options: SummaryOptions,
}

impl fmt::Debug for SummarizationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizationPipeline")
            .field("model", &self.model.name())
            .field("options", &self.options)
            .finish()
    }
}

impl SummarizationPipeline {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self::with_options(model, SummaryOptions::default())
    }

    pub fn with_options(model: Arc<dyn InferenceModel>, options: SummaryOptions) -> Self {
        Self { model, options }
    }

    /// Summarize arbitrary text. Empty input yields an empty summary without a model call.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let input = prepare_input(text);
        if input.is_empty() {
            return Ok(String::new());
        }
        debug!("Summarizing {} chars with {}", input.chars().count(), self.model.name());
        self.model.summarize(&input, &self.options).await
    }

    /// Summarize one article. A failure is contained in the returned result.
    pub async fn summarize_article(&self, article: Article) -> SummaryResult {
        match self.summarize(article.effective_input()).await {
            Ok(summary) => SummaryResult::generated(article, summary),
            Err(e) => {
                warn!("⚠️ Failed to summarize '{}': {}", article.title, e);
                SummaryResult::fallback(article, e.to_string())
            }
        }
    }

    /// Summarize articles in order, exactly one result per article.
    pub async fn summarize_articles(&self, articles: Vec<Article>) -> Vec<SummaryResult> {
        let mut results = Vec::with_capacity(articles.len());
        for article in articles {
            results.push(self.summarize_article(article).await);
        }
        results
    }
}
