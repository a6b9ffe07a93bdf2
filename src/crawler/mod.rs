//! Crawler module for listing traversal and record extraction
//!
//! This module contains the crawl-and-extract pipeline:
//! - HTTP fetching with a fixed client identity
//! - Listing page processing (cards and the next-page link)
//! - Detail page processing (address, contact links, map coordinates)
//! - Request pacing
//! - The pagination loop that ties them together

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use detail::{parse_detail_page, process_detail_page};
pub use fetcher::{build_http_client, FetchResult, Fetcher};
pub use listing::{parse_listing_page, process_listing_page, ListingPage, CARD_SELECTOR};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::GuideError;
use url::Url;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Walk the listing from `start_url`, one page at a time
/// 3. Enrich each card from its detail page (if enabled)
/// 4. Return the ordered records and the termination reason
pub async fn crawl(config: &Config, start_url: Url) -> Result<CrawlOutcome, GuideError> {
    run_crawl(config, start_url).await
}
