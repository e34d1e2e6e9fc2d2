//! Crawl report produced when a run finishes

use crate::state::{CrawlState, PageRecord};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Everything a finished crawl found
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Canonical seed address, if the crawl started
    pub base: Option<String>,

    /// Visited pages in the order their visits completed
    pub pages: Vec<PageRecord>,

    /// Canonical addresses visited
    pub visited: HashSet<String>,

    /// Raw link references seen on any page
    pub links_found: HashSet<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Builds a report from the final state of a run
    pub fn new(state: CrawlState, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        let (base, visited, links_found, pages) = state.into_parts();

        Self {
            base: base.map(|b| b.address),
            pages,
            visited,
            links_found,
            started_at,
            finished_at,
        }
    }

    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
