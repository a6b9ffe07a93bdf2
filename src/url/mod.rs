//! URL handling module for Guide-Crawler
//!
//! This module resolves hrefs found in listing and detail markup, validates
//! the crawl's start URL, and decides when two URLs address the same page.

mod normalize;
mod resolve;

use crate::ConfigError;
use url::Url;

// Re-export main functions
pub use normalize::{is_same_page, page_identity};
pub use resolve::resolve_href;

/// Parses and validates a crawl start URL
///
/// The URL must be absolute, use HTTP or HTTPS, and carry a host.
///
/// # Examples
///
/// ```
/// use guide_crawler::url::parse_start_url;
///
/// assert!(parse_start_url("https://guide.example.com/en/restaurants").is_ok());
/// assert!(parse_start_url("ftp://guide.example.com/").is_err());
/// assert!(parse_start_url("/en/restaurants").is_err());
/// ```
pub fn parse_start_url(url_str: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(url_str.trim())
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", url_str, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Only HTTP and HTTPS start URLs are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Start URL has no host: {}",
            url_str
        )));
    }

    Ok(url)
}
