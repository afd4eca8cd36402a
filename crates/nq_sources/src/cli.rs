use clap::{Args, Subcommand};
use nq_core::{Article, ArticleSource, Category, QuoteSource, Result};
use crate::config::SourcesConfig;
use crate::feeds::RssArticleSource;
use crate::scrapers::GoogleFinanceQuoteSource;

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[command(subcommand)]
    pub command: SourceCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SourceCommands {
    /// List configured feeds
    Feeds,
    /// Fetch articles without summarizing them
    News {
        /// Only show this category (finance or geopolitics)
        #[arg(long)]
        category: Option<Category>,
    },
    /// Fetch quotes for the given symbols, or the configured ones
    Quotes {
        symbols: Vec<String>,
    },
}

pub async fn handle_command(args: SourceArgs, config: &SourcesConfig) -> Result<()> {
    match args.command {
        SourceCommands::Feeds => {
            println!("Configured feeds:");
            for feed in &config.feeds {
                println!("  {:<12} {}", feed.category, feed.url);
            }
        }
        SourceCommands::News { category } => {
            let source = RssArticleSource::new(config)?;
            let articles = filter_by_category(source.fetch_articles().await?, category);
            println!("Found {} articles", articles.len());
            for article in articles {
                println!("- [{}] {} - {}", article.category, article.title, article.link);
            }
        }
        SourceCommands::Quotes { symbols } => {
            let symbols = if symbols.is_empty() { config.symbols.clone() } else { symbols };
            let source = GoogleFinanceQuoteSource::new(config)?;
            for quote in source.fetch_quotes(&symbols).await {
                println!("{}: {}", quote.symbol, quote.price);
            }
        }
    }
    Ok(())
}

fn filter_by_category(articles: Vec<Article>, category: Option<Category>) -> Vec<Article> {
    match category {
        Some(category) => articles.into_iter().filter(|a| a.category == category).collect(),
        None => articles,
    }
}
