//! Request pacing for the crawl
//!
//! This module handles:
//! - The politeness delay between successive listing pages
//! - The optional delay before each detail-page fetch
//! - The bound on concurrent detail-page fetches

use crate::config::CrawlerConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Paces listing and detail requests
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Pause between listing pages
    politeness_delay: Duration,

    /// Pause before each detail fetch
    detail_delay: Duration,

    /// Bound on in-flight detail fetches
    detail_permits: Arc<Semaphore>,

    detail_concurrency: usize,
}

impl Scheduler {
    /// Creates a scheduler from crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        Self::from_parts(
            Duration::from_millis(config.politeness_delay_ms),
            Duration::from_millis(config.detail_delay_ms),
            config.detail_concurrency as usize,
        )
    }

    /// Creates a scheduler from explicit values
    ///
    /// A concurrency of zero is raised to one.
    pub fn from_parts(
        politeness_delay: Duration,
        detail_delay: Duration,
        detail_concurrency: usize,
    ) -> Self {
        let detail_concurrency = detail_concurrency.max(1);
        Self {
            politeness_delay,
            detail_delay,
            detail_permits: Arc::new(Semaphore::new(detail_concurrency)),
            detail_concurrency,
        }
    }

    pub fn politeness_delay(&self) -> Duration {
        self.politeness_delay
    }

    pub fn detail_delay(&self) -> Duration {
        self.detail_delay
    }

    pub fn detail_concurrency(&self) -> usize {
        self.detail_concurrency
    }

    /// Returns true if detail pages are fetched one at a time
    pub fn is_sequential(&self) -> bool {
        self.detail_concurrency == 1
    }

    /// Waits out the politeness delay before the next listing page
    pub async fn wait_before_next_page(&self) {
        if !self.politeness_delay.is_zero() {
            tracing::info!(
                "Sleeping for {:?} before the next listing page",
                self.politeness_delay
            );
            tokio::time::sleep(self.politeness_delay).await;
        }
    }

    /// Acquires a detail-fetch slot and waits out the detail delay
    ///
    /// The slot is released when the returned permit is dropped.
    pub async fn acquire_detail_slot(&self) -> Option<OwnedSemaphorePermit> {
        let permit = self.detail_permits.clone().acquire_owned().await.ok()?;
        if !self.detail_delay.is_zero() {
            tokio::time::sleep(self.detail_delay).await;
        }
        Some(permit)
    }
}
