use std::fmt::Write;
use nq_core::{Dashboard, SummaryStatus};

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Only http(s) links are rendered as anchors.
fn is_web_link(link: &str) -> bool {
    link.starts_with("https://") || link.starts_with("http://")
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Finance &amp; Geopolitics News + Indian Stocks Summary</title>\n</head>\n<body>\n");
    out.push_str("<h1>Finance &amp; Geopolitics News + Indian Stocks Summary</h1>\n");

    out.push_str("<h2>News Summaries</h2>\n");
    if dashboard.summaries.is_empty() {
        out.push_str("<p>No articles available.</p>\n");
    }
    for result in &dashboard.summaries {
        let article = &result.article;
        let _ = writeln!(
            out,
            "<section class=\"article\">\n<h3>{} ({})</h3>",
            escape(&article.title),
            article.category
        );
        let _ = writeln!(out, "<p>{}</p>", escape(&result.summary_text));
        if let SummaryStatus::Fallback { error } = &result.status {
            let _ = writeln!(
                out,
                "<p class=\"fallback\"><em>Summary unavailable: {}</em></p>",
                escape(error)
            );
        }
        if is_web_link(&article.link) {
            let _ = writeln!(out, "<p><a href=\"{}\">Read more</a></p>", escape(&article.link));
        }
        out.push_str("</section>\n");
    }

    out.push_str("<h2>Real-time Indian Stock Prices</h2>\n<ul>\n");
    for quote in &dashboard.quotes {
        let _ = writeln!(
            out,
            "<li><strong>{}</strong>: {}</li>",
            escape(&quote.symbol),
            escape(&quote.price)
        );
    }
    out.push_str("</ul>\n");
    let _ = writeln!(
        out,
        "<footer>Generated {}</footer>\n</body>\n</html>",
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}
