//! Detail page processor
//!
//! Each restaurant has a dedicated page with its address, description,
//! contact links and an embedded map. Every field here is extracted on its
//! own; a page missing one node still yields all the others.

use crate::crawler::Fetcher;
use crate::extract::markup::{attr, first_attr, first_text, select_all};
use crate::extract::{parse_map_coordinates, strip_tel_scheme};
use crate::model::{Coordinates, DetailInfo};
use crate::url::resolve_href;
use scraper::{ElementRef, Html};
use url::Url;

const ADDRESS_SELECTOR: &str = "div.data-sheet__block--text";
const DESCRIPTION_SELECTOR: &str = "div.data-sheet__description";
const WEBSITE_SELECTOR: &str = r#"a[data-event="CTA_website"]"#;
const TELEPHONE_SELECTOR: &str = r#"a[data-event="CTA_tel"]"#;
const RESERVATION_SELECTOR: &str = "a.js-restaurant-book-btn";
const IFRAME_SELECTOR: &str = "iframe";

/// Position of the map widget among the page's iframes
const MAP_IFRAME_INDEX: usize = 1;

/// Fetches and processes a detail page
///
/// A failed fetch yields a `DetailInfo` with every field absent.
pub async fn process_detail_page(fetcher: &Fetcher, url: &Url) -> DetailInfo {
    match fetcher.fetch_body(url).await {
        Some(body) => parse_detail_page(&body, url),
        None => DetailInfo::default(),
    }
}

/// Extracts enrichment fields from detail-page markup
pub fn parse_detail_page(html: &str, page_url: &Url) -> DetailInfo {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let detail = DetailInfo {
        address: first_text(root, ADDRESS_SELECTOR),
        description: first_text(root, DESCRIPTION_SELECTOR),
        website_url: link(root, WEBSITE_SELECTOR, page_url),
        telephone: first_attr(root, TELEPHONE_SELECTOR, "href")
            .and_then(|href| strip_tel_scheme(&href)),
        reservation_url: link(root, RESERVATION_SELECTOR, page_url),
        coordinates: map_coordinates(root, page_url),
    };

    if detail.is_empty() {
        tracing::warn!("No detail fields found on {}", page_url);
    }

    detail
}

/// Returns the absolute href of the first matching link
fn link(root: ElementRef<'_>, css: &str, page_url: &Url) -> Option<String> {
    first_attr(root, css, "href")
        .and_then(|href| resolve_href(&href, page_url))
        .map(String::from)
}

/// Reads coordinates from the map iframe
fn map_coordinates(root: ElementRef<'_>, page_url: &Url) -> Option<Coordinates> {
    let iframes = select_all(root, IFRAME_SELECTOR);
    let src = match iframes.get(MAP_IFRAME_INDEX) {
        Some(iframe) => attr(*iframe, "src").or_else(|| attr(*iframe, "data-src"))?,
        None => {
            tracing::debug!(
                "Map iframe missing on {} ({} iframes)",
                page_url,
                iframes.len()
            );
            return None;
        }
    };

    match parse_map_coordinates(&src) {
        Ok(coordinates) => coordinates,
        Err(e) => {
            tracing::warn!("{} on {}", e, page_url);
            None
        }
    }
}
