use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::Result;

pub const DEFAULT_MIN_LENGTH: usize = 30;
pub const DEFAULT_MAX_LENGTH: usize = 130;

/// Generation bounds handed to a summarization backend.
///
/// Lengths are in the backend's own token units. Decoding is always
/// deterministic, so there is no sampling switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub min_length: usize,
    pub max_length: usize,
    pub num_beams: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            num_beams: 4,
        }
    }
}

#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Human readable backend name
    fn name(&self) -> &str;

    /// Summarize already prepared input text
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String>;
}
