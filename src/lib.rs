//! webscrape: a same-domain web crawler
//!
//! This crate walks every page reachable from a seed address without leaving
//! the seed's authority, visiting each canonical address at most once.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for webscrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Relative reference without a base: {0}")]
    RelativeWithoutBase(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Illegal character {ch:?} in URL reference: {reference}")]
    IllegalCharacter { reference: String, ch: char },
}

/// Result type alias for webscrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, Document, FetchError, PageSource};
pub use output::CrawlReport;
pub use state::CrawlState;
pub use crate::url::{canonicalize, is_crawlable, resolve_absolute, same_authority};
