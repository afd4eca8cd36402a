use std::io::IsTerminal;
use std::net::SocketAddr;
use std::process::ExitCode;
use clap::Parser;
use nq_core::Result;
use nq_inference::models::huggingface::{DEFAULT_API_URL, DEFAULT_MODEL_ID};
use nq_inference::{create_model, SummarizationPipeline};
use nq_sources::cli::{handle_command, SourceArgs};
use nq_sources::logging::init_logging;
use nq_sources::{DashboardManager, FeedSpec, SourcesConfig};
use tokio::io::AsyncReadExt;
use tracing::info;

mod duration;
mod render;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Finance & geopolitics news summaries with Indian stock prices", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NQ_MODEL", default_value = "huggingface", help = "Model to use for summarization. Available models: huggingface (default), dummy")]
    model: String,
    /// Model identifier on the inference endpoint
    #[arg(long, env = "NQ_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    model_id: String,
    /// Base URL of the inference endpoint
    #[arg(long, env = "NQ_MODEL_URL", default_value = DEFAULT_API_URL)]
    model_url: String,
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
    /// Timeout for a single summarization request (e.g. 60s, 2m)
    #[arg(long, default_value = "60s")]
    model_timeout: HumanDuration,
    /// Timeout for feed and quote requests
    #[arg(long, default_value = "10s")]
    http_timeout: HumanDuration,
    /// Replace the built-in feeds, repeatable (e.g. finance=https://example.com/rss.xml)
    #[arg(long = "feed", value_name = "CATEGORY=URL")]
    feeds: Vec<FeedSpec>,
    /// Articles taken from the top of each feed
    #[arg(long, default_value_t = nq_sources::feeds::DEFAULT_PER_FEED_LIMIT)]
    per_feed: usize,
    /// Articles shown on the dashboard
    #[arg(long, default_value_t = nq_sources::config::DEFAULT_MAX_ARTICLES)]
    max_articles: usize,
    /// Ticker symbols, comma separated
    #[arg(long, env = "NQ_SYMBOLS", value_delimiter = ',')]
    symbols: Vec<String>,
    #[arg(long, default_value = "NSE")]
    exchange: String,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone)]
enum Commands {
    /// Fetch, summarize and print the dashboard (default)
    Dashboard {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Summarize the given text, or stdin when omitted
    Summarize {
        text: Option<String>,
    },
    /// Serve the dashboard over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
    /// Inspect feeds and quotes without loading a model
    Sources(SourceArgs),
}

impl Cli {
    fn sources_config(&self) -> SourcesConfig {
        let mut config = SourcesConfig {
            per_feed_limit: self.per_feed,
            max_articles: self.max_articles,
            exchange: self.exchange.clone(),
            timeout: self.http_timeout.0,
            ..SourcesConfig::default()
        };
        if !self.feeds.is_empty() {
            config.feeds = self.feeds.clone();
        }
        let symbols: Vec<String> = self.symbols
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !symbols.is_empty() {
            config.symbols = symbols;
        }
        config
    }

    fn inference_config(&self) -> nq_inference::Config {
        nq_inference::Config {
            model: self.model.clone(),
            model_id: self.model_id.clone(),
            api_url: self.model_url.clone(),
            api_key: self.api_token.clone(),
            timeout: self.model_timeout.0,
            ..nq_inference::Config::default()
        }
    }
}

/// Loads the model once; every later summarization reuses it.
async fn load_pipeline(cli: &Cli) -> Result<SummarizationPipeline> {
    let config = cli.inference_config();
    info!("🧠 Loading summarization model {} ({})", config.model_id, config.model);
    let model = create_model(&config).await?;
    Ok(SummarizationPipeline::with_options(model, config.options))
}

async fn run(cli: Cli) -> Result<()> {
    let sources = cli.sources_config();
    let command = cli.command.clone().unwrap_or(Commands::Dashboard { json: false });

    match command {
        Commands::Sources(args) => handle_command(args, &sources).await,
        Commands::Summarize { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await?;
                    buffer
                }
            };
            let pipeline = load_pipeline(&cli).await?;
            println!("{}", pipeline.summarize(&text).await?);
            Ok(())
        }
        Commands::Dashboard { json } => {
            let pipeline = load_pipeline(&cli).await?;
            let manager = DashboardManager::from_config(&sources, pipeline)?;
            info!("🦗 Fetching news and quotes");
            let dashboard = manager.build_dashboard().await?;

            let stdout = std::io::stdout();
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                let styled = stdout.is_terminal();
                render::render_dashboard(&mut stdout.lock(), &dashboard, styled)?;
            }
            Ok(())
        }
        Commands::Serve { addr } => {
            let pipeline = load_pipeline(&cli).await?;
            let manager = DashboardManager::from_config(&sources, pipeline)?;
            nq_web::serve(addr, nq_web::AppState { manager }).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use nq_core::Category;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["nq"]).unwrap();
        assert!(cli.command.is_none());

        let config = cli.inference_config();
        assert_eq!(config.model_id, "facebook/bart-large-cnn");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.options.min_length, 30);
        assert_eq!(config.options.max_length, 130);

        let sources = cli.sources_config();
        assert_eq!(sources.feeds.len(), 4);
        assert_eq!(sources.symbols, vec!["INFY", "TCS", "RELIANCE", "HDFCBANK", "ICICIBANK"]);
        assert_eq!(sources.max_articles, 10);
        assert_eq!(sources.per_feed_limit, 5);
        assert_eq!(sources.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "nq",
            "--model", "dummy",
            "--feed", "geopolitics=https://example.com/world.xml",
            "--symbols", "TCS, WIPRO",
            "--http-timeout", "5s",
            "dashboard", "--json",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Commands::Dashboard { json: true })));
        assert_eq!(cli.inference_config().model, "dummy");

        let sources = cli.sources_config();
        assert_eq!(sources.feeds.len(), 1);
        assert_eq!(sources.feeds[0].category, Category::Geopolitics);
        assert_eq!(sources.symbols, vec!["TCS", "WIPRO"]);
        assert_eq!(sources.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_bad_feed() {
        assert!(Cli::try_parse_from(["nq", "--feed", "sports=https://example.com"]).is_err());
    }

    #[tokio::test]
    async fn test_unknown_model_fails_before_fetching() {
        let cli = Cli::try_parse_from(["nq", "--model", "nope", "summarize", "hello"]).unwrap();
        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("Unknown model"));
    }

    #[tokio::test]
    async fn test_summarize_with_dummy_model() {
        let cli = Cli::try_parse_from(["nq", "--model", "dummy", "summarize", "Sensex\nup"]).unwrap();
        assert!(run(cli).await.is_ok());
    }
}
