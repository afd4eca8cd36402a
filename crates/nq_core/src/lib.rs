pub mod models;
pub mod error;
pub mod sources;
pub mod types;

pub use error::{Error, Result};
pub use models::{InferenceModel, SummaryOptions};
pub use sources::{ArticleSource, QuoteSource};
pub use types::{Article, Category, Dashboard, Quote, SummaryResult, SummaryStatus, QUOTE_UNAVAILABLE};
