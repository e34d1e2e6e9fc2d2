//! Output module for reporting crawl results
//!
//! This module handles:
//! - The [`CrawlReport`] handed back when a crawl finishes
//! - Printing one line per visited page, optionally with its links
//! - Crawl statistics

mod report;
pub mod stats;

pub use report::CrawlReport;
pub use stats::{write_statistics, write_summary, CrawlStatistics};

use std::io::{self, Write};

/// Writes the visited pages of a report
///
/// Each visited page is written as `# <url>`, in visit order. With
/// `show_links`, every raw link found on that page follows as `  - <link>`.
pub fn write_report<W: Write>(
    report: &CrawlReport,
    show_links: bool,
    out: &mut W,
) -> io::Result<()> {
    for page in &report.pages {
        writeln!(out, "# {}", page.url)?;

        if show_links {
            for link in &page.links {
                writeln!(out, "  - {}", link)?;
            }
        }
    }
    Ok(())
}

/// Prints the visited pages of a report to stdout
pub fn print_report(report: &CrawlReport, show_links: bool) -> io::Result<()> {
    write_report(report, show_links, &mut io::stdout().lock())
}
