//! HTML parser for extracting link references
//!
//! This module turns an HTML body into a [`Document`]: the raw `href` value of
//! every anchor, in source order, plus the page title. Nothing is resolved or
//! filtered here; that is the crawler's job.

use scraper::{Html, Selector};

/// A parsed page, reduced to what the crawler needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    title: Option<String>,
    links: Vec<String>,
}

impl Document {
    /// Parses HTML content into a document
    ///
    /// # Link Extraction Rules
    ///
    /// - Every `<a>` element with an `href` attribute yields its value as written
    ///   (absolute, relative, fragment-only, other schemes, or empty)
    /// - `<a>` elements without `href` are skipped
    ///
    /// # Example
    ///
    /// ```
    /// use webscrape::crawler::Document;
    ///
    /// let html = r#"<html><head><title>Test</title></head>
    ///     <body><a href="/page">Link</a><a>No href</a><a href="">Empty</a></body></html>"#;
    /// let document = Document::parse(html);
    /// assert_eq!(document.title(), Some("Test"));
    /// assert_eq!(document.all_link_references(), ["/page", ""]);
    /// ```
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        Self {
            title: extract_title(&document),
            links: extract_link_references(&document),
        }
    }

    /// Builds a document directly from link references
    pub fn from_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: None,
            links: links.into_iter().map(Into::into).collect(),
        }
    }

    /// Every anchor's `href` value, in source order
    pub fn all_link_references(&self) -> &[String] {
        &self.links
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the raw `href` of every anchor element
fn extract_link_references(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
