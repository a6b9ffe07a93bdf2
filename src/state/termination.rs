//! Termination reasons for a crawl run
//!
//! A crawl always ends with exactly one of these. Only `InitialPageEmpty`
//! marks a failed run; every other reason is a normal end of the listing.
use std::fmt;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The start page yielded no cards (fetch failure or changed markup)
    InitialPageEmpty,

    /// A later page yielded no cards
    NaturalEnd,

    /// The last page had no usable "next" link
    NoNextLink,

    /// The "next" link pointed back to a page already crawled
    CycleDetected,

    /// The configured page limit was reached
    PageLimitReached,
}

impl TerminationReason {
    /// Returns true if the crawl ended normally
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::InitialPageEmpty)
    }

    /// Short machine-readable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialPageEmpty => "initial_page_empty",
            Self::NaturalEnd => "natural_end",
            Self::NoNextLink => "no_next_link",
            Self::CycleDetected => "cycle_detected",
            Self::PageLimitReached => "page_limit_reached",
        }
    }

    /// Human-readable explanation
    pub fn description(&self) -> &'static str {
        match self {
            Self::InitialPageEmpty => "the start page produced no restaurant cards",
            Self::NaturalEnd => "a listing page produced no restaurant cards",
            Self::NoNextLink => "the last listing page has no next-page link",
            Self::CycleDetected => "the next-page link points to a page already crawled",
            Self::PageLimitReached => "the configured page limit was reached",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
