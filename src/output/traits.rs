//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the run
//! summary they receive once a crawl has finished.

use crate::model::RestaurantRecord;
use crate::output::stats::CrawlStatistics;
use crate::state::TerminationReason;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Summary of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub start_url: String,
    pub started_at: String,
    pub finished_at: String,
    pub duration_seconds: i64,
    pub config_hash: Option<String>,

    // Termination
    pub reason: TerminationReason,

    // Traversal counts
    pub pages_visited: u32,
    pub excluded_cards: usize,
    pub duplicate_cards: usize,

    // Record statistics
    pub statistics: CrawlStatistics,
}

impl CrawlSummary {
    /// Returns true if the crawl ended normally
    pub fn is_success(&self) -> bool {
        self.reason.is_success()
    }

    /// Number of records emitted
    pub fn record_count(&self) -> usize {
        self.statistics.total_records
    }

    /// Average records per listing page
    pub fn records_per_page(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        self.record_count() as f64 / self.pages_visited as f64
    }
}

/// Trait for output handlers
///
/// A handler receives the crawl's records once, in order, and is then
/// finalized with the run summary.
pub trait OutputHandler {
    /// Writes the ordered records of a run
    fn write_records(&mut self, records: &[RestaurantRecord]) -> OutputResult<()>;

    /// Finishes the output, performing any final writes
    fn finalize(&mut self, summary: &CrawlSummary) -> OutputResult<()>;
}
