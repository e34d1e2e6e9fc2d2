//! Page fetching
//!
//! This module defines the [`PageSource`] seam the crawler fetches through and
//! the default HTTP implementation:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests with a bounded redirect chain
//! - Content-Type checking (only HTML is parsed)
//! - Error classification

use crate::config::{FetchConfig, UserAgentConfig};
use crate::crawler::parser::Document;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed for a single fetch
const MAX_REDIRECTS: usize = 10;

/// Reasons a page could not be retrieved
///
/// The crawler treats every variant the same way: the page is kept as
/// visited, contributes no links, and the crawl continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Expected HTML, got {content_type:?}")]
    ContentMismatch { content_type: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Source of page documents for the crawler
///
/// Given an absolute address, returns the parsed document or a retrieval
/// failure. Implementations must not panic on unreachable or malformed pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_document(&self, url: &Url) -> Result<Document, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use webscrape::config::Config;
/// use webscrape::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.user_agent, &config.fetch).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetch: &FetchConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .connect_timeout(Duration::from_secs(fetch.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageSource`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    /// Creates a page source with a client built from configuration
    pub fn new(user_agent: &UserAgentConfig, fetch: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(user_agent, fetch)?))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    /// Fetches and parses a page
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx with HTML Content-Type | `Ok(Document)` |
    /// | Non-2xx status (after redirects) | `Status` |
    /// | Any other Content-Type | `ContentMismatch` |
    /// | Timeout | `Timeout` |
    /// | Connection refused, DNS, TLS | `Connect` |
    /// | Redirect limit, body read error | `Network` |
    async fn fetch_document(&self, url: &Url) -> Result<Document, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html(&content_type) {
            return Err(FetchError::ContentMismatch { content_type });
        }

        let body = response.text().await?;
        Ok(Document::parse(&body))
    }
}

/// Returns true if a Content-Type header value denotes an HTML document
fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}
