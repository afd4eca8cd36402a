use std::io::{self, Write};
use crossterm::style::Stylize;
use nq_core::{Dashboard, SummaryStatus};

pub const TITLE: &str = "Finance & Geopolitics News + Indian Stocks Summary";

fn heading<W: Write>(out: &mut W, text: &str, styled: bool) -> io::Result<()> {
    if styled {
        writeln!(out, "{}", text.bold().underlined())
    } else {
        writeln!(out, "{}\n{}", text, "-".repeat(text.chars().count()))
    }
}

/// Writes the dashboard as plain text, with bold headings when `styled`.
pub fn render_dashboard<W: Write>(out: &mut W, dashboard: &Dashboard, styled: bool) -> io::Result<()> {
    heading(out, TITLE, styled)?;
    writeln!(out)?;

    heading(out, "News Summaries", styled)?;
    if dashboard.summaries.is_empty() {
        writeln!(out, "No articles available.")?;
    }
    for result in &dashboard.summaries {
        let article = &result.article;
        let title = format!("{} ({})", article.title, article.category);
        if styled {
            writeln!(out, "{}", title.bold())?;
        } else {
            writeln!(out, "{}", title)?;
        }
        writeln!(out, "  {}", result.summary_text)?;
        if let SummaryStatus::Fallback { error } = &result.status {
            writeln!(out, "  [summary unavailable: {}]", error)?;
        }
        if !article.link.is_empty() {
            writeln!(out, "  Read more: {}", article.link)?;
        }
        writeln!(out)?;
    }

    heading(out, "Real-time Indian Stock Prices", styled)?;
    for quote in &dashboard.quotes {
        writeln!(out, "{}: {}", quote.symbol, quote.price)?;
    }
    writeln!(out)?;
    writeln!(out, "Generated {}", dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    out.flush()
}
