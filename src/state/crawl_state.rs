//! Per-run crawl state
//!
//! A [`CrawlState`] is owned by exactly one crawler for the duration of one
//! crawl. It is the dedup ledger (`visited`), the raw link log
//! (`links_found`), the fixed crawl base, and the ordered page record used for
//! reporting.

use crate::state::PageState;
use crate::url::{authority, parse_address};
use crate::UrlResult;
use std::collections::HashSet;

/// The first address processed in a run, fixed for the rest of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlBase {
    /// Canonical address of the seed; relative links resolve against it
    pub address: String,

    /// Authority (host[:port]) every crawled page must share
    pub authority: String,
}

impl CrawlBase {
    /// Builds a base from a canonical address
    ///
    /// Fails if the address does not parse or has no host.
    pub fn new(address: &str) -> UrlResult<Self> {
        let url = parse_address(address)?;
        let authority = authority(&url)
            .ok_or_else(|| crate::UrlError::MissingHost(address.to_string()))?;

        Ok(Self {
            address: address.to_string(),
            authority,
        })
    }
}

/// What happened when a single address was visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Canonical address of the page
    pub url: String,

    /// Number of link hops from the seed
    pub depth: u32,

    /// Final state of the visit
    pub state: PageState,

    /// Page title, when the page was parsed and had one
    pub title: Option<String>,

    /// Raw link references found on the page, in source order
    pub links: Vec<String>,
}

/// Mutable state of a single crawl run
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    links_found: HashSet<String>,
    base: Option<CrawlBase>,
    pages: Vec<PageRecord>,
}

impl CrawlState {
    /// Creates an empty crawl state
    pub fn new() -> Self {
        Self::default()
    }

    /// True before the first address has been processed
    pub fn is_fresh(&self) -> bool {
        self.visited.is_empty() && self.base.is_none()
    }

    /// Records the crawl base if none is set yet
    ///
    /// Returns true if the base was set by this call. Later calls leave the
    /// existing base untouched.
    pub fn set_base_once(&mut self, base: CrawlBase) -> bool {
        if self.base.is_some() {
            return false;
        }
        self.base = Some(base);
        true
    }

    pub fn base(&self) -> Option<&CrawlBase> {
        self.base.as_ref()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Marks a canonical address as visited
    ///
    /// Returns false if it was already present; the caller must then skip it.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Records a raw link reference exactly as it appeared on a page
    pub fn record_link(&mut self, raw: &str) {
        if !self.links_found.contains(raw) {
            self.links_found.insert(raw.to_string());
        }
    }

    pub fn record_page(&mut self, page: PageRecord) {
        self.pages.push(page);
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn links_found(&self) -> &HashSet<String> {
        &self.links_found
    }

    /// Visited pages in the order their visits completed
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of visited pages whose retrieval failed
    pub fn failure_count(&self) -> usize {
        self.pages.iter().filter(|p| p.state.is_error()).count()
    }

    /// Consumes the state, returning its parts for reporting
    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<CrawlBase>,
        HashSet<String>,
        HashSet<String>,
        Vec<PageRecord>,
    ) {
        (self.base, self.visited, self.links_found, self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, state: PageState) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            depth: 0,
            state,
            title: None,
            links: Vec::new(),
        }
    }

    #[test]
    fn test_new_state_is_fresh() {
        let state = CrawlState::new();
        assert!(state.is_fresh());
        assert!(state.base().is_none());
        assert_eq!(state.visited_count(), 0);
    }

    #[test]
    fn test_base_is_set_once() {
        let mut state = CrawlState::new();
        let first = CrawlBase::new("https://example.com").unwrap();
        let second = CrawlBase::new("https://other.com").unwrap();

        assert!(state.set_base_once(first.clone()));
        assert!(!state.set_base_once(second));
        assert_eq!(state.base(), Some(&first));
        assert!(!state.is_fresh());
    }

    #[test]
    fn test_base_authority() {
        let base = CrawlBase::new("http://127.0.0.1:8080/start").unwrap();
        assert_eq!(base.address, "http://127.0.0.1:8080/start");
        assert_eq!(base.authority, "127.0.0.1:8080");
    }

    #[test]
    fn test_base_requires_absolute_address() {
        assert!(CrawlBase::new("/relative").is_err());
        assert!(matches!(
            CrawlBase::new("mailto:someone@example.com"),
            Err(crate::UrlError::MissingHost(_))
        ));
    }

    #[test]
    fn test_mark_visited_only_once() {
        let mut state = CrawlState::new();
        assert!(state.mark_visited("https://example.com"));
        assert!(!state.mark_visited("https://example.com"));
        assert!(state.is_visited("https://example.com"));
        assert_eq!(state.visited_count(), 1);
        assert!(!state.is_fresh());
    }

    #[test]
    fn test_record_link_keeps_raw_strings() {
        let mut state = CrawlState::new();
        state.record_link("/socials");
        state.record_link("/socials");
        state.record_link("");

        assert_eq!(state.links_found().len(), 2);
        assert!(state.links_found().contains(""));
        assert!(state.links_found().contains("/socials"));
    }

    #[test]
    fn test_failure_count() {
        let mut state = CrawlState::new();
        state.record_page(record("https://example.com", PageState::Processed));
        state.record_page(record("https://example.com/gone", PageState::DeadLink));
        state.record_page(record("https://example.com/slow", PageState::Unreachable));

        assert_eq!(state.pages().len(), 3);
        assert_eq!(state.failure_count(), 2);
    }
}
