//! Data model for harvested restaurants
//!
//! - `RatingTier`: the award level inferred from a card's icons
//! - `ListingCard`: one summary card scraped from a listing page
//! - `DetailInfo`: enrichment scraped from a restaurant's detail page
//! - `RestaurantRecord`: the merged unit of output

mod rating;
mod record;

pub use rating::RatingTier;
pub use record::{Coordinates, DetailInfo, ListingCard, RestaurantRecord};
