pub mod google_finance;

pub use google_finance::GoogleFinanceQuoteSource;

/// Common utilities for scrapers
pub(crate) mod utils {
    use nq_core::{Error, Result};
    use scraper::{Html, Node, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn extract_text(document: &Html, selector: &str) -> Result<String> {
        let selector = Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))?;

        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .ok_or_else(|| Error::Scraping(format!("No element found for selector: {:?}", selector)))
    }

    const BLOCK_TAGS: &[&str] = &[
        "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
        "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol",
        "p", "pre", "section", "table", "td", "th", "tr", "ul",
    ];

    fn is_block(node: &Node) -> bool {
        matches!(node, Node::Element(el) if BLOCK_TAGS.contains(&el.name()))
    }

    fn push_break(text: &mut String) {
        if !text.is_empty() && !text.ends_with(char::is_whitespace) {
            text.push(' ');
        }
    }

    /// Plain text of an HTML fragment. Entities are decoded, tags dropped,
    /// and block or `<br>` boundaries become a single space.
    pub fn html_to_text(fragment: &str) -> String {
        let document = Html::parse_fragment(fragment);
        let mut text = String::new();
        for node in document.root_element().descendants() {
            match node.value() {
                Node::Text(t) => {
                    if node.prev_sibling().map_or(false, |prev| is_block(prev.value())) {
                        push_break(&mut text);
                    }
                    text.push_str(t);
                }
                other if is_block(other) => push_break(&mut text),
                _ => {}
            }
        }
        text.trim().to_string()
    }
}
