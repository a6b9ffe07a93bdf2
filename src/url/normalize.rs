use url::Url;

/// Returns the identity of a page URL for loop detection
///
/// Two URLs that differ only in their fragment or in a trailing slash on a
/// non-root path address the same listing page.
///
/// # Example
///
/// ```
/// use guide_crawler::url::page_identity;
/// use url::Url;
///
/// let a = Url::parse("https://example.com/list/page/2/#results").unwrap();
/// let b = Url::parse("https://example.com/list/page/2").unwrap();
/// assert_eq!(page_identity(&a), page_identity(&b));
/// ```
pub fn page_identity(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        let trimmed = if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed
        };
        url.set_path(&trimmed);
    }

    url
}

/// Returns true if both URLs address the same page
pub fn is_same_page(a: &Url, b: &Url) -> bool {
    page_identity(a) == page_identity(b)
}
