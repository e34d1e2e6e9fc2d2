//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: The visited set, raw links found, and crawl base of one run
//! - `PageState`: The final state of each visited page
//! - `PageRecord`: What was found on a visited page

mod crawl_state;
mod page_state;

// Re-export main types
pub use crawl_state::{CrawlBase, CrawlState, PageRecord};
pub use page_state::PageState;
