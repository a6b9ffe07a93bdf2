//! Output module for crawl results
//!
//! This module handles:
//! - Writing records as CSV
//! - Generating markdown summaries of a run
//! - Computing record statistics

mod csv_output;
mod markdown;
pub mod stats;
mod traits;

pub use csv_output::CsvOutputHandler;
pub use markdown::{
    format_markdown_summary, format_preview_table, generate_markdown_summary,
    MarkdownOutputHandler,
};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{CrawlSummary, OutputError, OutputHandler, OutputResult};

use crate::crawler::CrawlOutcome;

/// Generates a run summary from a finished crawl
///
/// # Arguments
///
/// * `outcome` - The finished crawl
/// * `config_hash` - Hash of the configuration file, if one was used
pub fn generate_summary(outcome: &CrawlOutcome, config_hash: Option<String>) -> CrawlSummary {
    CrawlSummary {
        start_url: outcome.start_url.to_string(),
        started_at: outcome.started_at.to_rfc3339(),
        finished_at: outcome.finished_at.to_rfc3339(),
        duration_seconds: outcome.duration().num_seconds(),
        config_hash,
        reason: outcome.reason,
        pages_visited: outcome.pages_visited,
        excluded_cards: outcome.excluded_cards,
        duplicate_cards: outcome.duplicate_cards,
        statistics: CrawlStatistics::from_records(&outcome.records),
    }
}

/// Sends a crawl's records and summary through every handler
pub fn write_outcome(
    handlers: &mut [Box<dyn OutputHandler>],
    outcome: &CrawlOutcome,
    summary: &CrawlSummary,
) -> OutputResult<()> {
    for handler in handlers.iter_mut() {
        handler.write_records(&outcome.records)?;
        handler.finalize(summary)?;
    }
    Ok(())
}
