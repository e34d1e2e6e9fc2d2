//! Statistics derived from a crawl report
//!
//! This module provides functionality for summarizing and displaying
//! what a crawl visited and found.

use crate::output::CrawlReport;
use crate::state::PageState;
use std::collections::HashMap;
use std::io::{self, Write};

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of pages visited (fetched or attempted)
    pub total_pages: u64,

    /// Count of pages by final state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Number of distinct raw link references seen
    pub total_links: u64,

    /// Deepest link distance from the seed reached
    pub max_depth: u32,

    /// Duration of the crawl in milliseconds
    pub duration_ms: i64,
}

impl CrawlStatistics {
    /// Computes statistics from a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut pages_by_state = HashMap::new();
        for page in &report.pages {
            *pages_by_state.entry(page.state).or_insert(0) += 1;
        }

        Self {
            total_pages: report.visited.len() as u64,
            pages_by_state,
            total_links: report.links_found.len() as u64,
            max_depth: report.pages.iter().map(|p| p.depth).max().unwrap_or(0),
            duration_ms: report.duration().num_milliseconds(),
        }
    }

    /// Number of pages in the given state
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Number of pages whose retrieval failed
    pub fn failed(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Percentage of visited pages that were processed successfully
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.count(PageState::Processed) as f64 / self.total_pages as f64) * 100.0
    }
}

/// Writes statistics in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `out` - Destination, usually stdout
pub fn write_statistics<W: Write>(stats: &CrawlStatistics, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===")?;
    writeln!(out, "  Pages visited: {}", stats.total_pages)?;
    writeln!(out, "  Distinct links found: {}", stats.total_links)?;
    writeln!(out, "  Deepest page: {} hops from seed", stats.max_depth)?;
    writeln!(out, "  Duration: {}ms", stats.duration_ms)?;

    if stats.failed() > 0 {
        writeln!(out, "Failures:")?;
        for state in PageState::all_states() {
            let count = stats.count(state);
            if state.is_error() && count > 0 {
                writeln!(out, "  {}: {}", state, count)?;
            }
        }
    }

    writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} pages successfully processed)",
        stats.success_rate(),
        stats.count(PageState::Processed),
        stats.total_pages
    )
}

/// Writes the end-of-run summary
///
/// With `detailed`, the full statistics block is written. Otherwise a single
/// `Visited N pages, found M distinct links` line is written, unless `quiet`.
pub fn write_summary<W: Write>(
    stats: &CrawlStatistics,
    detailed: bool,
    quiet: bool,
    out: &mut W,
) -> io::Result<()> {
    if detailed {
        writeln!(out)?;
        write_statistics(stats, out)
    } else if quiet {
        Ok(())
    } else {
        writeln!(
            out,
            "Visited {} pages, found {} distinct links",
            stats.total_pages, stats.total_links
        )
    }
}
