//! webscrape main entry point
//!
//! This is the command-line interface for the webscrape same-domain crawler.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use webscrape::config::{load_config_with_hash, validate, Config};
use webscrape::crawler::crawl;
use webscrape::output::{print_report, write_summary, CrawlStatistics};
use webscrape::ScrapeError;

/// webscrape: a same-domain web crawler
///
/// webscrape visits every page reachable from the seed address without
/// leaving the seed's host, fetching each page at most once, and prints the
/// pages it visited.
#[derive(Parser, Debug)]
#[command(name = "webscrape")]
#[command(version)]
#[command(about = "A same-domain web crawler", long_about = None)]
struct Cli {
    /// Address to start crawling from
    #[arg(value_name = "URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// List the links found under each visited page
    #[arg(long)]
    show_links: bool,

    /// Print crawl statistics after the page list
    #[arg(long)]
    stats: bool,

    /// Stop after visiting this many pages
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Do not follow links more than this many hops from the seed
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Number of pages fetched at once
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config)?;

    let report = match crawl(&cli.seed, &config).await {
        Ok(report) => report,
        Err(ScrapeError::InvalidSeed(seed)) => {
            tracing::debug!("Rejected seed {:?}", seed);
            println!("Please provide a valid URL to scrape.");
            return Ok(());
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if !cli.quiet {
        print_report(&report, cli.show_links)?;
    }

    let stats = CrawlStatistics::from_report(&report);
    write_summary(&stats, cli.stats, cli.quiet, &mut std::io::stdout().lock())?;

    Ok(())
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = Some(max_depth);
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webscrape=info,warn"),
            1 => EnvFilter::new("webscrape=debug,info"),
            2 => EnvFilter::new("webscrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
