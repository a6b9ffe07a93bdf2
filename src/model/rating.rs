//! Rating tier definitions for restaurant awards
//!
//! A tier is inferred from the award icons present on a listing card.
use std::fmt;

/// Award level of a restaurant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RatingTier {
    /// No award icon was present
    #[default]
    None,

    /// Listed in the guide without a star ("The Plate")
    Plate,

    /// Bib Gourmand: good value for money
    BibGourmand,

    /// One star
    OneStar,

    /// Two stars
    TwoStars,

    /// Three stars
    ThreeStars,
}

impl RatingTier {
    /// All tiers, from lowest to highest
    pub const ALL: [RatingTier; 6] = [
        Self::None,
        Self::Plate,
        Self::BibGourmand,
        Self::OneStar,
        Self::TwoStars,
        Self::ThreeStars,
    ];

    /// Maps a star count to a tier
    ///
    /// Counts above three are clamped to `ThreeStars`.
    pub fn from_star_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            1 => Self::OneStar,
            2 => Self::TwoStars,
            _ => Self::ThreeStars,
        }
    }

    /// Number of stars carried by this tier
    pub fn stars(&self) -> u8 {
        match self {
            Self::OneStar => 1,
            Self::TwoStars => 2,
            Self::ThreeStars => 3,
            _ => 0,
        }
    }

    /// Returns true if the tier is one of the star tiers
    pub fn is_starred(&self) -> bool {
        self.stars() > 0
    }

    /// Human-readable label used in output files
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No Rating",
            Self::Plate => "The Plate",
            Self::BibGourmand => "Bib Gourmand",
            Self::OneStar => "1 Star",
            Self::TwoStars => "2 Stars",
            Self::ThreeStars => "3 Stars",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
