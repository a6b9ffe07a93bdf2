//! Rating tier inference from award icon markers
//!
//! A listing card shows its award as one or more `<img>` icons. Stars are
//! drawn by repeating a single one-star icon, so the tier is a count of those
//! icons rather than a lookup of a distinct asset. Some listing variants use
//! dedicated two- and three-star assets instead; those are counted as two and
//! three markers.

use crate::model::RatingTier;

/// Substring identifying the Bib Gourmand icon
pub const BIB_GOURMAND_MARKER: &str = "bib-gourmand";

/// Substring identifying a single star icon
pub const ONE_STAR_MARKER: &str = "1star";

/// Substring identifying "The Plate" icon
pub const PLATE_MARKER: &str = "plate";

const TWO_STARS_MARKER: &str = "2stars";
const THREE_STARS_MARKER: &str = "3stars";

/// Classifies a card's award from its icon source identifiers
///
/// # Rules
///
/// 1. Any Bib Gourmand marker wins, regardless of star markers present
/// 2. Otherwise stars are counted (count ≥ 4 is clamped to three stars)
/// 3. With no stars, a plate marker yields `Plate`
/// 4. Anything else is `None`
///
/// Matching is a case-insensitive substring test on each marker.
///
/// # Example
///
/// ```
/// use guide_crawler::extract::classify_rating;
/// use guide_crawler::RatingTier;
///
/// let markers = ["/assets/1star.svg", "/assets/1star.svg"];
/// assert_eq!(classify_rating(markers), RatingTier::TwoStars);
/// ```
pub fn classify_rating<I, S>(markers: I) -> RatingTier
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stars = 0usize;
    let mut plate = false;

    for marker in markers {
        let marker = marker.as_ref().to_ascii_lowercase();

        if marker.contains(BIB_GOURMAND_MARKER) {
            return RatingTier::BibGourmand;
        }

        if marker.contains(ONE_STAR_MARKER) {
            stars += 1;
        } else if marker.contains(TWO_STARS_MARKER) {
            stars += 2;
        } else if marker.contains(THREE_STARS_MARKER) {
            stars += 3;
        } else if marker.contains(PLATE_MARKER) {
            plate = true;
        }
    }

    match stars {
        0 if plate => RatingTier::Plate,
        count => RatingTier::from_star_count(count),
    }
}
