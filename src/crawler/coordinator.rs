//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Fixing the crawl base from the seed
//! - Admitting addresses from the scheduler exactly once
//! - Fetching pages through a [`PageSource`]
//! - Resolving, canonicalizing, and filtering the links found on each page
//!
//! All crawl state is mutated on the task driving the loop. With more than one
//! fetch in flight only the fetches themselves run concurrently, so the
//! visited check and insert can never race.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchError, PageSource};
use crate::crawler::parser::Document;
use crate::crawler::scheduler::{QueuedUrl, Scheduler};
use crate::output::CrawlReport;
use crate::state::{CrawlBase, CrawlState, PageRecord, PageState};
use crate::url::{canonicalize, is_crawlable, parse_address, resolve_absolute, same_authority};
use crate::{Result, ScrapeError};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Instant;
use url::Url;

/// Same-domain crawler over a [`PageSource`]
///
/// One `Crawler` owns one [`CrawlState`]; create a new crawler for each run.
pub struct Crawler<S> {
    source: S,
    config: CrawlerConfig,
    state: CrawlState,
    started_at: Option<DateTime<Utc>>,
}

impl<S: PageSource> Crawler<S> {
    /// Creates a crawler with an empty state
    pub fn new(source: S, config: CrawlerConfig) -> Self {
        Self {
            source,
            config,
            state: CrawlState::new(),
            started_at: None,
        }
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    /// Crawls every same-authority page reachable from `seed`
    ///
    /// The first call fixes the crawl base. Calling again with an address that
    /// is already visited does nothing. Retrieval failures never abort the
    /// crawl; they are logged and recorded on the page.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The worklist was exhausted (or a budget was spent)
    /// * `Err(ScrapeError::InvalidSeed)` - The seed is empty or not crawlable;
    ///   nothing was fetched
    pub async fn crawl(&mut self, seed: &str) -> Result<()> {
        let url = canonicalize(seed);
        if seed.trim().is_empty() || !is_crawlable(&url) {
            return Err(ScrapeError::InvalidSeed(seed.to_string()));
        }

        if self.state.is_fresh() {
            let base = CrawlBase::new(&url)?;
            tracing::info!(
                "Crawl base is {} (authority {})",
                base.address,
                base.authority
            );
            self.state.set_base_once(base);
            self.started_at.get_or_insert_with(Utc::now);
        }

        if self.state.is_visited(&url) {
            tracing::debug!("{} already visited, nothing to do", url);
            return Ok(());
        }

        let mut scheduler = Scheduler::new(&self.config);
        scheduler.push(QueuedUrl { url, depth: 0 });
        self.run(&mut scheduler).await;

        Ok(())
    }

    /// Runs the crawl loop until the scheduler is drained
    async fn run(&mut self, scheduler: &mut Scheduler) {
        let Self {
            source,
            config,
            state,
            ..
        } = self;
        let source = &*source;
        let limit = config.max_concurrent_fetches.max(1) as usize;

        let mut in_flight = FuturesUnordered::new();
        let start_time = Instant::now();
        let mut pages_done = 0usize;

        loop {
            while in_flight.len() < limit {
                let Some(queued) = scheduler.next_url() else {
                    break;
                };
                let Some(url) = admit(state, scheduler, &queued) else {
                    continue;
                };

                tracing::debug!("Fetching {} (depth {})", queued.url, queued.depth);
                in_flight.push(async move {
                    let result = source.fetch_document(&url).await;
                    (queued, result)
                });
            }

            let Some((queued, result)) = in_flight.next().await else {
                break;
            };
            process_page(state, scheduler, queued, result);

            pages_done += 1;
            if pages_done % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} in worklist, {:.2} pages/sec",
                    pages_done,
                    scheduler.frontier_size(),
                    pages_done as f64 / start_time.elapsed().as_secs_f64()
                );
            }
        }

        tracing::info!(
            "Crawl finished: {} pages visited ({} failed), {} distinct links seen in {:?}",
            state.visited_count(),
            state.failure_count(),
            state.links_found().len(),
            start_time.elapsed()
        );
    }

    /// Ends the run and returns its report
    pub fn finish(self) -> CrawlReport {
        let finished_at = Utc::now();
        CrawlReport::new(
            self.state,
            self.started_at.unwrap_or(finished_at),
            finished_at,
        )
    }
}

/// Marks a scheduled address visited if it may be fetched
///
/// Returns the parsed URL to fetch, or `None` if the address was already
/// visited, the page budget is spent, or it fails to parse.
fn admit(state: &mut CrawlState, scheduler: &mut Scheduler, queued: &QueuedUrl) -> Option<Url> {
    if state.is_visited(&queued.url) {
        tracing::trace!("Skipping {}: already visited", queued.url);
        return None;
    }

    if !scheduler.has_page_budget(state.visited_count()) {
        tracing::info!(
            "Page budget of {} reached, dropping {} scheduled addresses",
            state.visited_count(),
            scheduler.frontier_size() + 1
        );
        scheduler.clear();
        return None;
    }

    state.mark_visited(&queued.url);

    match parse_address(&queued.url) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Cannot fetch {}: {}", queued.url, e);
            state.record_page(PageRecord {
                url: queued.url.clone(),
                depth: queued.depth,
                state: PageState::Failed,
                title: None,
                links: Vec::new(),
            });
            None
        }
    }
}

/// Records a fetched page and schedules its unvisited same-authority links
fn process_page(
    state: &mut CrawlState,
    scheduler: &mut Scheduler,
    queued: QueuedUrl,
    result: std::result::Result<Document, FetchError>,
) {
    let document = match result {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", queued.url, e);
            state.record_page(PageRecord {
                url: queued.url,
                depth: queued.depth,
                state: PageState::from(&e),
                title: None,
                links: Vec::new(),
            });
            return;
        }
    };

    let base = match state.base() {
        Some(base) => base.address.clone(),
        None => queued.url.clone(),
    };

    let mut candidates: Vec<String> = Vec::new();
    for raw in document.all_link_references() {
        state.record_link(raw);

        let link = canonicalize(&resolve_absolute(raw, &base));
        if !is_crawlable(&link) {
            tracing::trace!("Skipping {:?}: not crawlable", raw);
            continue;
        }
        if !same_authority(&link, &base) {
            tracing::trace!("Skipping {}: outside {}", link, base);
            continue;
        }
        if state.is_visited(&link) || candidates.contains(&link) {
            continue;
        }
        candidates.push(link);
    }

    let link_count = document.all_link_references().len();
    let scheduled = scheduler.push_children(queued.depth, candidates);
    tracing::debug!(
        "Processed {}: {} links, {} scheduled",
        queued.url,
        link_count,
        scheduled
    );

    state.record_page(PageRecord {
        url: queued.url,
        depth: queued.depth,
        state: PageState::Processed,
        title: document.title().map(str::to_string),
        links: document.all_link_references().to_vec(),
    });
}
