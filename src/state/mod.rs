//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the current page, accumulated records and dedup sets of one run
//! - `TerminationReason`: why a run stopped

mod crawl_state;
mod termination;

// Re-export main types
pub use crawl_state::CrawlState;
pub use termination::TerminationReason;
