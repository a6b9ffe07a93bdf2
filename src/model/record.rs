//! Listing cards, detail enrichment and the merged restaurant record

use crate::model::RatingTier;
use url::Url;

/// Geographic position taken from a detail page's map widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One summary card scraped from a listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    /// Restaurant name (empty when the title node is missing)
    pub name: String,

    /// Award level inferred from the card's icons
    pub rating: RatingTier,

    /// City or area shown in the card footer
    pub city: Option<String>,

    /// Price range symbols (e.g. "€€")
    pub price_range: Option<String>,

    /// Cuisine label
    pub cuisine: Option<String>,

    /// Absolute URL of the restaurant's detail page
    pub detail_url: Option<Url>,
}

/// Fields scraped from a restaurant's detail page
///
/// Every field is independent; a page missing one node still yields the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailInfo {
    pub address: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    /// Bare telephone number with the `tel:` scheme removed
    pub telephone: Option<String>,
    pub reservation_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl DetailInfo {
    /// Returns true if no field could be extracted
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A restaurant as emitted by a crawl run
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantRecord {
    pub name: String,
    pub rating: RatingTier,
    pub city: Option<String>,
    pub price_range: Option<String>,
    pub cuisine: Option<String>,
    pub detail_url: Option<Url>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub telephone: Option<String>,
    pub reservation_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl RestaurantRecord {
    /// Builds a record from a card and (optionally) its detail page
    pub fn new(card: ListingCard, detail: Option<DetailInfo>) -> Self {
        let detail = detail.unwrap_or_default();
        Self {
            name: card.name,
            rating: card.rating,
            city: card.city,
            price_range: card.price_range,
            cuisine: card.cuisine,
            detail_url: card.detail_url,
            address: detail.address,
            description: detail.description,
            website_url: detail.website_url,
            telephone: detail.telephone,
            reservation_url: detail.reservation_url,
            coordinates: detail.coordinates,
        }
    }

    /// Returns true if any detail-page field is present
    pub fn has_details(&self) -> bool {
        self.address.is_some()
            || self.description.is_some()
            || self.website_url.is_some()
            || self.telephone.is_some()
            || self.reservation_url.is_some()
            || self.coordinates.is_some()
    }
}

impl From<ListingCard> for RestaurantRecord {
    fn from(card: ListingCard) -> Self {
        Self::new(card, None)
    }
}
