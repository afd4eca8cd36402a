use std::sync::Arc;
use nq_core::{Error, InferenceModel, Result};
use tracing::info;
use crate::Config;

pub mod dummy;
pub mod huggingface;

pub use dummy::DummyModel;
pub use huggingface::HuggingFaceModel;

pub const AVAILABLE_MODELS: &[&str] = &["huggingface", "dummy"];

/// Build the summarization model selected by `config.model`.
///
/// Remote backends are checked once here, so a model that cannot serve
/// requests is reported before the first article is processed.
pub async fn create_model(config: &Config) -> Result<Arc<dyn InferenceModel>> {
    let model: Arc<dyn InferenceModel> = match config.model.to_lowercase().as_str() {
        "huggingface" | "hf" => Arc::new(HuggingFaceModel::new(config).await?),
        "dummy" => Arc::new(DummyModel::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown model: {}. Available models: {}",
                other,
                AVAILABLE_MODELS.join(", ")
            )))
        }
    };
    info!("🧠 Inference model ready (using {})", model.name());
    Ok(model)
}
