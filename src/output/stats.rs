//! Statistics over a crawl's records
//!
//! This module counts records per rating tier and measures how much of the
//! detail-page enrichment succeeded.

use crate::model::{RatingTier, RestaurantRecord};
use std::collections::BTreeMap;

/// Record statistics for one crawl
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of records
    pub total_records: usize,

    /// Count of records by rating tier
    pub by_rating: BTreeMap<RatingTier, usize>,

    /// Records with at least one detail-page field
    pub with_details: usize,

    /// Records with map coordinates
    pub with_coordinates: usize,

    /// Records with a website link
    pub with_website: usize,

    /// Records whose price/cuisine footer could not be read
    pub missing_price: usize,
}

impl CrawlStatistics {
    /// Computes statistics over a record sequence
    pub fn from_records(records: &[RestaurantRecord]) -> Self {
        let mut stats = Self {
            total_records: records.len(),
            ..Self::default()
        };

        for record in records {
            *stats.by_rating.entry(record.rating).or_insert(0) += 1;

            if record.has_details() {
                stats.with_details += 1;
            }
            if record.coordinates.is_some() {
                stats.with_coordinates += 1;
            }
            if record.website_url.is_some() {
                stats.with_website += 1;
            }
            if record.price_range.is_none() {
                stats.missing_price += 1;
            }
        }

        stats
    }

    /// Number of records carrying the given tier
    pub fn count(&self, tier: RatingTier) -> usize {
        self.by_rating.get(&tier).copied().unwrap_or(0)
    }

    /// Number of starred records
    pub fn starred(&self) -> usize {
        self.by_rating
            .iter()
            .filter(|(tier, _)| tier.is_starred())
            .map(|(_, count)| count)
            .sum()
    }

    /// Share of records with detail fields, as a percentage
    pub fn detail_coverage(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        (self.with_details as f64 / self.total_records as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total records: {}", stats.total_records);
    println!("  Starred: {}", stats.starred());
    println!();

    println!("Records by Rating:");
    // Highest tier first
    for (tier, count) in stats.by_rating.iter().rev() {
        let percentage = if stats.total_records > 0 {
            (*count as f64 / stats.total_records as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", tier, count, percentage);
    }
    println!();

    println!("Enrichment:");
    println!(
        "  With detail fields: {} ({:.1}%)",
        stats.with_details,
        stats.detail_coverage()
    );
    println!("  With coordinates: {}", stats.with_coordinates);
    println!("  With website: {}", stats.with_website);
    if stats.missing_price > 0 {
        println!("  Missing price/cuisine: {}", stats.missing_price);
    }
}
