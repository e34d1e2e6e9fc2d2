//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageSource`] seam
//! - HTML parsing and link extraction
//! - The depth-first worklist and crawl budgets
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, FetchError, HttpPageSource, PageSource};
pub use parser::Document;
pub use scheduler::{QueuedUrl, Scheduler};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::Result;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the user agent and fetch settings
/// 2. Walk every same-authority page reachable from `seed`
/// 3. Return the report of what was visited and found
///
/// # Arguments
///
/// * `seed` - Address the crawl starts from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; individual page failures are in
///   the report
/// * `Err(ScrapeError)` - The seed was invalid or the client could not be built
pub async fn crawl(seed: &str, config: &Config) -> Result<CrawlReport> {
    let source = HttpPageSource::new(&config.user_agent, &config.fetch)?;
    let mut crawler = Crawler::new(source, config.crawler.clone());
    crawler.crawl(seed).await?;
    Ok(crawler.finish())
}
