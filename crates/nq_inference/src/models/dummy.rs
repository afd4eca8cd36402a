use std::fmt;
use nq_core::{InferenceModel, Result, SummaryOptions};

/// Offline extractive stand-in: keeps the leading words of the input.
///
/// Token bounds are read as whitespace-separated words.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        let words: Vec<&str> = text.split_whitespace().take(options.max_length).collect();
        Ok(words.join(" "))
    }
}
