use url::Url;

/// Resolves a link href against the page it was found on
///
/// Returns None if the link should not be followed:
/// - empty or fragment-only (`#`, `#top`) hrefs
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
///
/// # Example
///
/// ```
/// use guide_crawler::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/en/restaurants").unwrap();
/// let next = resolve_href("/en/restaurants/page/2", &base).unwrap();
/// assert_eq!(next.as_str(), "https://example.com/en/restaurants/page/2");
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Failed to resolve {} against {}: {}", href, base_url, e);
            None
        }
    }
}
