//! Per-run crawl state
//!
//! `CrawlState` exclusively owns the ordered record sequence of one run. It
//! is created for the start URL, advanced once per listing page, and consumed
//! at termination.

use crate::model::RestaurantRecord;
use crate::state::TerminationReason;
use crate::url::page_identity;
use crate::GuideError;
use std::collections::HashSet;
use url::Url;

/// State of a single crawl run
#[derive(Debug)]
pub struct CrawlState {
    /// Listing page currently being processed (None once terminated)
    current_url: Option<Url>,

    /// 1-based index of the current listing page
    page_index: u32,

    /// Records accumulated so far, in page-then-card order
    records: Vec<RestaurantRecord>,

    /// Names admitted so far
    seen_names: HashSet<String>,

    /// Identities of listing pages already crawled
    visited: HashSet<Url>,

    /// Whether repeated names are dropped
    dedupe_names: bool,

    /// Number of cards dropped as duplicates
    duplicates_skipped: usize,

    termination: Option<TerminationReason>,
}

impl CrawlState {
    /// Creates the initial state for a crawl starting at `start_url`
    pub fn new(start_url: Url, dedupe_names: bool) -> Self {
        let mut visited = HashSet::new();
        visited.insert(page_identity(&start_url));

        Self {
            current_url: Some(start_url),
            page_index: 1,
            records: Vec::new(),
            seen_names: HashSet::new(),
            visited,
            dedupe_names,
            duplicates_skipped: 0,
            termination: None,
        }
    }

    pub fn current_url(&self) -> Option<&Url> {
        self.current_url.as_ref()
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    pub fn duplicates_skipped(&self) -> usize {
        self.duplicates_skipped
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    /// Returns true if the page has already been crawled in this run
    pub fn has_visited(&self, url: &Url) -> bool {
        self.visited.contains(&page_identity(url))
    }

    /// Decides whether a card with this name enters the result set
    ///
    /// With deduplication enabled, the first card carrying a name is admitted
    /// and later ones are rejected. Cards without a name are always admitted
    /// since they have no identity to compare.
    pub fn admit(&mut self, name: &str) -> bool {
        if !self.dedupe_names || name.is_empty() {
            return true;
        }

        if self.seen_names.insert(name.to_string()) {
            true
        } else {
            self.duplicates_skipped += 1;
            false
        }
    }

    /// Appends a record to the run's result sequence
    pub fn push_record(&mut self, record: RestaurantRecord) -> Result<(), GuideError> {
        if let Some(reason) = self.termination {
            return Err(GuideError::InvalidTransition(format!(
                "cannot add record {:?} after termination ({})",
                record.name, reason
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// Moves to the next listing page
    pub fn advance(&mut self, next_url: Url) -> Result<(), GuideError> {
        if let Some(reason) = self.termination {
            return Err(GuideError::InvalidTransition(format!(
                "cannot advance to {} after termination ({})",
                next_url, reason
            )));
        }

        self.visited.insert(page_identity(&next_url));
        self.current_url = Some(next_url);
        self.page_index += 1;
        Ok(())
    }

    /// Ends the run; the first reason recorded wins
    pub fn terminate(&mut self, reason: TerminationReason) {
        if self.termination.is_none() {
            self.termination = Some(reason);
            self.current_url = None;
        }
    }

    /// Consumes the state, returning its records and termination reason
    pub fn into_parts(self) -> (Vec<RestaurantRecord>, Option<TerminationReason>) {
        (self.records, self.termination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListingCard, RatingTier};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn record(name: &str) -> RestaurantRecord {
        RestaurantRecord::from(ListingCard {
            name: name.to_string(),
            rating: RatingTier::None,
            city: None,
            price_range: None,
            cuisine: None,
            detail_url: None,
        })
    }

    #[test]
    fn test_initial_state() {
        let state = CrawlState::new(url("https://example.com/list"), true);
        assert_eq!(state.page_index(), 1);
        assert_eq!(state.current_url(), Some(&url("https://example.com/list")));
        assert!(state.records().is_empty());
        assert!(!state.is_terminated());
        assert!(state.has_visited(&url("https://example.com/list#top")));
    }

    #[test]
    fn test_advance() {
        let mut state = CrawlState::new(url("https://example.com/list"), true);
        state.advance(url("https://example.com/list/page/2")).unwrap();

        assert_eq!(state.page_index(), 2);
        assert!(state.has_visited(&url("https://example.com/list/page/2")));
        assert!(!state.has_visited(&url("https://example.com/list/page/3")));
    }

    #[test]
    fn test_records_keep_order() {
        let mut state = CrawlState::new(url("https://example.com/list"), true);
        state.push_record(record("A")).unwrap();
        state.push_record(record("B")).unwrap();
        state.terminate(TerminationReason::NoNextLink);

        let (records, reason) = state.into_parts();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(reason, Some(TerminationReason::NoNextLink));
    }

    #[test]
    fn test_admit_dedupes_names() {
        let mut state = CrawlState::new(url("https://example.com/list"), true);
        assert!(state.admit("Akordu"));
        assert!(!state.admit("Akordu"));
        assert!(state.admit("Wakakusa"));
        assert_eq!(state.duplicates_skipped(), 1);
    }

    #[test]
    fn test_admit_empty_names_always() {
        let mut state = CrawlState::new(url("https://example.com/list"), true);
        assert!(state.admit(""));
        assert!(state.admit(""));
        assert_eq!(state.duplicates_skipped(), 0);
    }

    #[test]
    fn test_admit_without_dedupe() {
        let mut state = CrawlState::new(url("https://example.com/list"), false);
        assert!(state.admit("Akordu"));
        assert!(state.admit("Akordu"));
    }

    #[test]
    fn test_first_termination_wins() {
        let mut state = CrawlState::new(url("https://example.com/list"), true);
        state.terminate(TerminationReason::NaturalEnd);
        state.terminate(TerminationReason::NoNextLink);

        assert_eq!(state.termination(), Some(TerminationReason::NaturalEnd));
        assert!(state.current_url().is_none());
    }

    #[test]
    fn test_no_transitions_after_termination() {
        let mut state = CrawlState::new(url("https://example.com/list"), true);
        state.terminate(TerminationReason::InitialPageEmpty);

        assert!(matches!(
            state.advance(url("https://example.com/list/page/2")),
            Err(GuideError::InvalidTransition(_))
        ));
        assert!(matches!(
            state.push_record(record("A")),
            Err(GuideError::InvalidTransition(_))
        ));
    }
}
