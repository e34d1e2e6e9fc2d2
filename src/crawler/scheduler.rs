//! Scheduler for managing the crawl worklist and budgets
//!
//! This module handles:
//! - The depth-first worklist of canonical addresses still to visit
//! - Depth tracking from the seed
//! - The optional page and depth budgets

use crate::config::CrawlerConfig;

/// An address waiting to be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// Canonical address to visit
    pub url: String,

    /// Number of link hops from the seed
    pub depth: u32,
}

/// Scheduler owns the worklist and enforces the crawl budgets
///
/// The worklist is a stack: the candidates most recently discovered are
/// visited first, so each path is explored depth-first. Candidates from one
/// page are pushed in reverse so they come off in source order.
#[derive(Debug)]
pub struct Scheduler {
    /// Pending addresses, top of stack last
    frontier: Vec<QueuedUrl>,

    max_pages: Option<usize>,
    max_depth: Option<u32>,
}

impl Scheduler {
    /// Creates an empty scheduler with the budgets from configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            frontier: Vec::new(),
            max_pages: config.max_pages,
            max_depth: config.max_depth,
        }
    }

    /// Adds a single address to the top of the worklist
    pub fn push(&mut self, queued: QueuedUrl) {
        self.frontier.push(queued);
    }

    /// Adds the candidates found on one page, at the depth below it
    ///
    /// Nothing is added if `parent_depth` is already at the depth budget.
    /// Returns the number of addresses scheduled.
    pub fn push_children(&mut self, parent_depth: u32, candidates: Vec<String>) -> usize {
        if !self.may_expand(parent_depth) {
            tracing::debug!(
                "Depth budget reached at depth {}, not scheduling {} links",
                parent_depth,
                candidates.len()
            );
            return 0;
        }

        let count = candidates.len();
        let depth = parent_depth + 1;
        self.frontier.extend(
            candidates
                .into_iter()
                .rev()
                .map(|url| QueuedUrl { url, depth }),
        );
        count
    }

    /// Takes the next address to visit
    pub fn next_url(&mut self) -> Option<QueuedUrl> {
        self.frontier.pop()
    }

    /// Returns true if links found at `depth` may be followed
    pub fn may_expand(&self, depth: u32) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    /// Returns true if another page may be fetched after `visited` pages
    pub fn has_page_budget(&self, visited: usize) -> bool {
        self.max_pages.map_or(true, |max| visited < max)
    }

    /// Number of addresses waiting in the worklist
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Drops every pending address
    ///
    /// Used once the page budget is spent so the run can drain and finish.
    pub fn clear(&mut self) {
        self.frontier.clear();
    }
}
