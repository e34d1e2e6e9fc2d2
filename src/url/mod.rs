//! URL handling module for webscrape
//!
//! This module provides address parsing, relative reference resolution,
//! canonicalization, authority comparison, and the crawlability filter.
//!
//! Every public boolean or string operation here fails closed: malformed input
//! is excluded from the crawl (or passed through unchanged) rather than raised.
//! The result-typed primitives [`parse_address`] and [`check_reference`] are
//! available for callers that want the explicit outcome.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{authority, same_authority};
pub use normalize::{canonicalize, check_reference, parse_address, resolve_absolute};

/// URL schemes the crawler will fetch
pub const CRAWLABLE_SCHEMES: &[&str] = &["http", "https"];

/// Address suffixes the crawler never fetches
///
/// Pages served under a file extension (`.html`, `.php`, ...) are excluded
/// along with media and documents; only extensionless paths are followed.
pub const NON_CRAWLABLE_EXTENSIONS: &[&str] = &[
    ".7z", ".aac", ".asp", ".aspx", ".avi", ".bmp", ".css", ".csv", ".docx", ".exe", ".flac",
    ".flv", ".gif", ".gz", ".htm", ".html", ".ico", ".jpeg", ".jpg", ".js", ".json", ".jsonld",
    ".jsp", ".m4a", ".md", ".mkv", ".mov", ".mp3", ".mp4", ".ogg", ".pdf", ".php", ".png",
    ".pptx", ".rar", ".svg", ".tar", ".ts", ".txt", ".wav", ".webm", ".webp", ".wmv", ".xlsx",
    ".xml", ".yaml", ".yml", ".zip",
];

/// Checks whether an address is something the crawler may fetch
///
/// An address is crawlable when it parses as an absolute URL, its scheme is
/// `http` or `https`, and it does not end with one of
/// [`NON_CRAWLABLE_EXTENSIONS`]. The suffix match is case-sensitive.
///
/// Relative references are never crawlable; resolve them with
/// [`resolve_absolute`] first.
///
/// # Examples
///
/// ```
/// use webscrape::url::is_crawlable;
///
/// assert!(is_crawlable("https://example.com/jobs"));
/// assert!(!is_crawlable("https://example.com/report.pdf"));
/// assert!(!is_crawlable("https://example.com/about.html"));
/// assert!(!is_crawlable("ftp://example.com/"));
/// assert!(!is_crawlable("/socials"));
/// ```
pub fn is_crawlable(address: &str) -> bool {
    match parse_address(address) {
        Ok(url) => {
            CRAWLABLE_SCHEMES.contains(&url.scheme()) && !has_non_crawlable_extension(address)
        }
        Err(e) => {
            tracing::trace!("Not crawlable: {}", e);
            false
        }
    }
}

/// Returns true if the address ends with a non-crawlable file extension
fn has_non_crawlable_extension(address: &str) -> bool {
    NON_CRAWLABLE_EXTENSIONS
        .iter()
        .any(|extension| address.ends_with(extension))
}
