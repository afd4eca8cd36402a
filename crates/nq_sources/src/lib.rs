pub mod cli;
pub mod config;
pub mod feeds;
pub mod logging;
pub mod manager;
pub mod scrapers;

pub use cli::{handle_command, SourceArgs, SourceCommands};
pub use config::SourcesConfig;
pub use feeds::{FeedSpec, RssArticleSource};
pub use manager::DashboardManager;
pub use scrapers::GoogleFinanceQuoteSource;

