//! HTML parser for extracting page text and links
//!
//! This module turns a fetched HTML document into:
//! - Cleaned visible text (boilerplate removed, whitespace collapsed)
//! - Links to follow (absolute, fragment-free URLs)
//! - Page title

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Elements whose text never reaches the corpus
pub const BOILERPLATE_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible text with boilerplate removed and whitespace collapsed
    pub text: String,

    /// All links found on the page (absolute URLs, in document order)
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts text, links and title
///
/// # Text Extraction Rules
///
/// - Text nested anywhere inside `script`, `style`, `nav`, `footer` or
///   `header` is dropped
/// - Remaining text nodes are joined, every whitespace run becomes one
///   space, and the result is trimmed
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags outside boilerplate elements
/// - `<a href="...">` inside boilerplate elements too, when
///   `follow_boilerplate_links` is set
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
/// * `follow_boilerplate_links` - Keep links found inside boilerplate elements
///
/// # Example
///
/// ```
/// use site_corpus::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head>
///     <body><nav><a href="/menu">Menu</a></nav><p>Hello   world</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, false);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.text, "Test Hello world Link");
/// assert_eq!(parsed.links.len(), 1);
/// ```
pub fn parse_html(html: &str, base_url: &Url, follow_boilerplate_links: bool) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_text(&document),
        links: extract_links(&document, base_url, follow_boilerplate_links),
    }
}

/// Collapses every whitespace run to a single space and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_boilerplate(tag: &str) -> bool {
    BOILERPLATE_TAGS.contains(&tag)
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

/// Extracts visible text outside boilerplate elements
fn extract_text(document: &Html) -> String {
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| is_boilerplate(element.name()));

        if !hidden {
            pieces.push(text);
        }
    }

    // Joined with a separator so adjacent blocks never fuse into one word
    collapse_whitespace(&pieces.join(" "))
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url, follow_boilerplate_links: bool) -> Vec<Url> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter(|element| {
            follow_boilerplate_links
                || !element
                    .ancestors()
                    .filter_map(|ancestor| ancestor.value().as_element())
                    .any(|ancestor| is_boilerplate(ancestor.name()))
        })
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}
