//! Field extractors
//!
//! Pure functions turning listing-card and detail-page markup into typed
//! fields:
//! - Award icon markers → `RatingTier`
//! - Card footer text → price range and cuisine
//! - Map widget URL → coordinates
//! - Contact links → bare values
//!
//! The `markup` helpers wrap the `scraper` crate so that processors can ask
//! for "first text under this selector" without repeating selector plumbing.

mod coordinates;
mod footer;
pub mod markup;
mod rating;

pub use coordinates::parse_map_coordinates;
pub use footer::split_price_cuisine;
pub use rating::{classify_rating, BIB_GOURMAND_MARKER, ONE_STAR_MARKER, PLATE_MARKER};

/// Removes a `tel:` scheme prefix from a telephone link
///
/// Returns None for a link that is empty once the prefix is removed.
pub fn strip_tel_scheme(href: &str) -> Option<String> {
    let href = href.trim();
    let number = match href.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("tel:") => &href[4..],
        _ => href,
    };
    let number = number.trim();

    if number.is_empty() {
        None
    } else {
        Some(number.to_string())
    }
}
