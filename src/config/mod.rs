//! Configuration module for webscrape
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, [`Config::default`] is used.
//!
//! # Example
//!
//! ```no_run
//! use webscrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webscrape.toml")).unwrap();
//! println!("Fetches in flight: {}", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetchConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
