//! Price range and cuisine from a listing card footer
//!
//! The footer reads like `€€ · Japanese`, with unpredictable spacing and line
//! breaks around the middle-dot separator.

use crate::{ExtractError, ExtractResult};

/// Separator between price range and cuisine
const SEPARATOR: char = '·';

/// Splits footer text into `(price_range, cuisine)`
///
/// All whitespace is removed before splitting. Everything after the first
/// separator belongs to the cuisine.
///
/// # Errors
///
/// `ExtractError::MalformedFooter` if there is no separator or either side
/// is empty.
///
/// # Example
///
/// ```
/// use guide_crawler::extract::split_price_cuisine;
///
/// let (price, cuisine) = split_price_cuisine("  €€  ·  Japanese  ").unwrap();
/// assert_eq!(price, "€€");
/// assert_eq!(cuisine, "Japanese");
/// ```
pub fn split_price_cuisine(footer: &str) -> ExtractResult<(String, String)> {
    let compact: String = footer.split_whitespace().collect();

    match compact.split_once(SEPARATOR) {
        Some((price, cuisine)) if !price.is_empty() && !cuisine.is_empty() => {
            Ok((price.to_string(), cuisine.to_string()))
        }
        _ => Err(ExtractError::MalformedFooter(footer.trim().to_string())),
    }
}
