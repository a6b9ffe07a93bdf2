//! Crawler coordinator - the pagination loop
//!
//! This module drives a crawl from its start URL to termination:
//! - Fetching and processing one listing page at a time
//! - Dropping duplicate names
//! - Enriching cards from their detail pages
//! - Following the next-page link after the politeness delay
//! - Deciding why and when the crawl ends

use crate::config::{Config, CrawlerConfig, ExclusionSet};
use crate::crawler::detail::process_detail_page;
use crate::crawler::listing::process_listing_page;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::Fetcher;
use crate::model::{DetailInfo, ListingCard, RestaurantRecord};
use crate::state::{CrawlState, TerminationReason};
use crate::GuideError;
use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use url::Url;

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// The listing page the crawl started from
    pub start_url: Url,

    /// Records in page-then-card order
    pub records: Vec<RestaurantRecord>,

    /// Why the crawl stopped
    pub reason: TerminationReason,

    /// Number of listing pages requested
    pub pages_visited: u32,

    /// Cards dropped by the exclusion set
    pub excluded_cards: usize,

    /// Cards dropped because their name was already seen
    pub duplicate_cards: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlOutcome {
    /// Returns true unless the start page yielded nothing
    pub fn is_success(&self) -> bool {
        self.reason.is_success()
    }

    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Fetcher,
    scheduler: Scheduler,
    exclusions: ExclusionSet,
    settings: CrawlerConfig,
}

impl Coordinator {
    /// Creates a coordinator from the full configuration
    pub fn new(config: &Config) -> Result<Self, GuideError> {
        let fetcher = Fetcher::new(&config.client)?;
        Ok(Self::with_fetcher(fetcher, config))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(fetcher: Fetcher, config: &Config) -> Self {
        Self {
            fetcher,
            scheduler: Scheduler::new(&config.crawler),
            exclusions: config.exclusion_set(),
            settings: config.crawler.clone(),
        }
    }

    /// Runs the pagination loop until it terminates
    ///
    /// Fetch failures never surface here: a failing start page ends the
    /// crawl with `InitialPageEmpty`, a failing later page with `NaturalEnd`,
    /// and a failing detail page leaves that record's detail fields absent.
    /// An `Err` is only returned if the crawl state is driven through an
    /// invalid transition.
    pub async fn run(&self, start_url: Url) -> Result<CrawlOutcome, GuideError> {
        let started_at = Utc::now();
        let mut state = CrawlState::new(start_url.clone(), self.settings.dedupe_names);
        let mut excluded_cards = 0;

        tracing::info!("Starting crawl from {}", start_url);

        while let Some(url) = state.current_url().cloned() {
            let page_index = state.page_index();
            tracing::info!("--- Processing page {}: {} ---", page_index, url);

            let page = process_listing_page(&self.fetcher, &url, &self.exclusions).await;
            excluded_cards += page.excluded;

            if page.cards.is_empty() {
                if page_index == 1 {
                    tracing::warn!("Start page yielded no cards; cannot continue");
                    state.terminate(TerminationReason::InitialPageEmpty);
                } else {
                    tracing::info!("Page {} yielded no cards; stopping", page_index);
                    state.terminate(TerminationReason::NaturalEnd);
                }
                break;
            }

            let cards: Vec<ListingCard> = page
                .cards
                .into_iter()
                .filter(|card| {
                    let admitted = state.admit(&card.name);
                    if !admitted {
                        tracing::debug!("Skipping duplicate card: {}", card.name);
                    }
                    admitted
                })
                .collect();

            let page_records = self.enrich(cards).await;
            let added = page_records.len();
            for record in page_records {
                state.push_record(record)?;
            }

            tracing::info!(
                "Page {} added {} records ({} total)",
                page_index,
                added,
                state.records().len()
            );

            match page.next_url {
                None => {
                    tracing::info!("No next page link; crawl complete");
                    state.terminate(TerminationReason::NoNextLink);
                }
                Some(next_url) if state.has_visited(&next_url) => {
                    tracing::warn!("Next page {} was already crawled; stopping", next_url);
                    state.terminate(TerminationReason::CycleDetected);
                }
                Some(_) if self.page_limit_reached(page_index) => {
                    tracing::info!("Page limit of {} reached; stopping", page_index);
                    state.terminate(TerminationReason::PageLimitReached);
                }
                Some(next_url) => {
                    self.scheduler.wait_before_next_page().await;
                    state.advance(next_url)?;
                }
            }
        }

        let pages_visited = state.page_index();
        let duplicate_cards = state.duplicates_skipped();
        let (records, reason) = state.into_parts();
        let reason = reason.ok_or_else(|| {
            GuideError::InvalidTransition("crawl loop ended without a termination reason".into())
        })?;

        let outcome = CrawlOutcome {
            start_url,
            records,
            reason,
            pages_visited,
            excluded_cards,
            duplicate_cards,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl finished: {} records from {} pages in {}s ({})",
            outcome.records.len(),
            outcome.pages_visited,
            outcome.duration().num_seconds(),
            outcome.reason.description()
        );

        Ok(outcome)
    }

    fn page_limit_reached(&self, page_index: u32) -> bool {
        matches!(self.settings.max_pages, Some(max) if page_index >= max)
    }

    /// Turns one page's cards into records, fetching detail pages if enabled
    ///
    /// Output order always matches card order.
    async fn enrich(&self, cards: Vec<ListingCard>) -> Vec<RestaurantRecord> {
        if !self.settings.fetch_details {
            return cards.into_iter().map(RestaurantRecord::from).collect();
        }

        let details = if self.scheduler.is_sequential() {
            self.fetch_details_sequential(&cards).await
        } else {
            self.fetch_details_concurrent(&cards).await
        };

        cards
            .into_iter()
            .zip(details)
            .map(|(card, detail)| RestaurantRecord::new(card, detail))
            .collect()
    }

    /// Fetches detail pages one at a time in card order
    async fn fetch_details_sequential(&self, cards: &[ListingCard]) -> Vec<Option<DetailInfo>> {
        let mut details = Vec::with_capacity(cards.len());

        for card in cards {
            let detail = match &card.detail_url {
                Some(url) => {
                    let _permit = self.scheduler.acquire_detail_slot().await;
                    Some(process_detail_page(&self.fetcher, url).await)
                }
                None => None,
            };
            details.push(detail);
        }

        details
    }

    /// Fetches detail pages on a bounded pool, re-sorted to card order
    async fn fetch_details_concurrent(&self, cards: &[ListingCard]) -> Vec<Option<DetailInfo>> {
        let mut details: Vec<Option<DetailInfo>> = vec![None; cards.len()];
        let mut tasks = JoinSet::new();

        for (index, card) in cards.iter().enumerate() {
            let Some(url) = card.detail_url.clone() else {
                continue;
            };
            let fetcher = self.fetcher.clone();
            let scheduler = self.scheduler.clone();

            tasks.spawn(async move {
                let _permit = scheduler.acquire_detail_slot().await;
                (index, process_detail_page(&fetcher, &url).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, detail)) => details[index] = Some(detail),
                Err(e) => tracing::error!("Detail fetch task failed: {}", e),
            }
        }

        details
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use guide_crawler::config::Config;
/// use guide_crawler::crawler::run_crawl;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let start = Url::parse("https://guide.michelin.com/us/en/nara-region/restaurants")?;
/// let outcome = run_crawl(&Config::default(), start).await?;
/// println!("{} records ({})", outcome.records.len(), outcome.reason);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, start_url: Url) -> Result<CrawlOutcome, GuideError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run(start_url).await
}
