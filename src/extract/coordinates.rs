//! Coordinates from an embedded map widget
//!
//! Detail pages embed a map iframe whose `src` carries the position as
//! `q=<lat>,<lon>` in its query string.

use crate::model::Coordinates;
use crate::{ExtractError, ExtractResult};

/// Query parameter holding the coordinate pair
const QUERY_PARAM: &str = "q";

/// Parses coordinates from a map iframe `src`
///
/// The URL may be absolute, protocol-relative or relative; only its query
/// string is inspected.
///
/// # Returns
///
/// * `Ok(Some(Coordinates))` - A valid `q=<lat>,<lon>` pair was found
/// * `Ok(None)` - The URL has no `q` parameter
/// * `Err(ExtractError::CoordinateParse)` - `q` is present but malformed
///
/// # Example
///
/// ```
/// use guide_crawler::extract::parse_map_coordinates;
///
/// let coords = parse_map_coordinates("https://maps.example.com/maps?q=35.0116,135.7681")
///     .unwrap()
///     .unwrap();
/// assert_eq!(coords.latitude, 35.0116);
/// assert_eq!(coords.longitude, 135.7681);
/// ```
pub fn parse_map_coordinates(src: &str) -> ExtractResult<Option<Coordinates>> {
    let query = match src.split_once('?') {
        Some((_, rest)) => rest.split('#').next().unwrap_or(rest),
        None => return Ok(None),
    };

    let value = match url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == QUERY_PARAM)
    {
        Some((_, value)) => value.into_owned(),
        None => return Ok(None),
    };

    let malformed = || ExtractError::CoordinateParse(value.clone());

    let mut parts = value.split(',');
    let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lon), None) => (lat.trim(), lon.trim()),
        _ => return Err(malformed()),
    };

    let latitude: f64 = lat.parse().map_err(|_| malformed())?;
    let longitude: f64 = lon.parse().map_err(|_| malformed())?;

    if !latitude.is_finite()
        || !longitude.is_finite()
        || !(-90.0..=90.0).contains(&latitude)
        || !(-180.0..=180.0).contains(&longitude)
    {
        return Err(malformed());
    }

    Ok(Some(Coordinates {
        latitude,
        longitude,
    }))
}
