use std::fmt;
use std::time::Duration;
use nq_core::SummaryOptions;

pub mod models;
pub mod pipeline;

pub const DEFAULT_MODEL: &str = "huggingface";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct Config {
    /// Backend name, see [`models::create_model`]
    pub model: String,
    /// Model identifier on the inference endpoint
    pub model_id: String,
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub options: SummaryOptions,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("model_id", &self.model_id)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("options", &self.options)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            model_id: models::huggingface::DEFAULT_MODEL_ID.to_string(),
            api_url: models::huggingface::DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            options: SummaryOptions::default(),
        }
    }
}

pub use models::create_model;
pub use pipeline::{SummarizationPipeline, MAX_INPUT_CHARS};
