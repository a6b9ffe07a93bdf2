//! Listing page processor
//!
//! A listing page shows a grid of restaurant cards and a pagination bar. This
//! module turns one such page into its cards plus the URL of the next page.

use crate::config::ExclusionSet;
use crate::crawler::Fetcher;
use crate::extract::markup::{
    attr, element_text, first_attr, first_text, raw_text, select_all, select_first,
};
use crate::extract::{classify_rating, split_price_cuisine};
use crate::model::ListingCard;
use crate::url::{is_same_page, resolve_href};
use scraper::{ElementRef, Html};
use url::Url;

/// One restaurant card
pub const CARD_SELECTOR: &str = "div.card__menu-content";

const NAME_SELECTOR: &str = "h3.card__menu-content--title";
const TITLE_LINK_SELECTOR: &str = "h3.card__menu-content--title a[href]";
const ANY_LINK_SELECTOR: &str = "a[href]";
const FOOTER_SELECTOR: &str = "div.card__menu-footer--score";
const AWARD_ICON_SELECTOR: &str = "span.distinction-icon img";
const PAGINATION_LINK_SELECTOR: &str = "ul.pagination li a";
const NEXT_ICON_SELECTOR: &str = "i.fa-angle-right";

/// Cards and pagination extracted from one listing page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    /// Cards in document order, excluded names removed
    pub cards: Vec<ListingCard>,

    /// Absolute URL of the next listing page
    pub next_url: Option<Url>,

    /// Number of cards dropped by the exclusion set
    pub excluded: usize,
}

/// Fetches and processes a listing page
///
/// A failed fetch yields an empty page with no next link.
pub async fn process_listing_page(
    fetcher: &Fetcher,
    url: &Url,
    exclusions: &ExclusionSet,
) -> ListingPage {
    match fetcher.fetch_body(url).await {
        Some(body) => parse_listing_page(&body, url, exclusions),
        None => ListingPage::default(),
    }
}

/// Extracts cards and the next-page link from listing markup
///
/// # Rules
///
/// 1. A page without cards has no next page either
/// 2. Cards whose name is in `exclusions` are skipped
/// 3. Relative links resolve against `page_url`
/// 4. A next link that is empty, `#`, or points back at `page_url` is ignored
///
/// The result depends only on the inputs, so parsing the same document twice
/// yields identical pages.
pub fn parse_listing_page(html: &str, page_url: &Url, exclusions: &ExclusionSet) -> ListingPage {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let card_nodes = select_all(root, CARD_SELECTOR);
    if card_nodes.is_empty() {
        tracing::info!("No restaurant cards found on {}", page_url);
        return ListingPage::default();
    }

    let mut page = ListingPage::default();

    for node in card_nodes {
        let name = first_text(node, NAME_SELECTOR).unwrap_or_default();

        if exclusions.contains(&name) {
            tracing::debug!("Skipping excluded card: {}", name);
            page.excluded += 1;
            continue;
        }

        page.cards.push(parse_card(node, name, page_url));
    }

    page.next_url = find_next_url(root, page_url);

    tracing::info!(
        "Found {} cards on {} ({} excluded)",
        page.cards.len(),
        page_url,
        page.excluded
    );

    page
}

/// Extracts every field of one card except its name
fn parse_card(card: ElementRef<'_>, name: String, page_url: &Url) -> ListingCard {
    if name.is_empty() {
        tracing::debug!("Card without a title on {}", page_url);
    }

    let markers: Vec<String> = select_all(card, AWARD_ICON_SELECTOR)
        .into_iter()
        .filter_map(|img| attr(img, "src").or_else(|| attr(img, "data-src")))
        .collect();
    let rating = classify_rating(&markers);

    let footers = select_all(card, FOOTER_SELECTOR);
    let city = footers
        .first()
        .map(|footer| element_text(*footer))
        .filter(|s| !s.is_empty());

    let (price_range, cuisine) = match footers.get(1) {
        Some(footer) => match split_price_cuisine(&raw_text(*footer)) {
            Ok((price, cuisine)) => (Some(price), Some(cuisine)),
            Err(e) => {
                tracing::warn!("Card {:?}: {}", name, e);
                (None, None)
            }
        },
        None => (None, None),
    };

    let detail_url = first_attr(card, TITLE_LINK_SELECTOR, "href")
        .or_else(|| first_attr(card, ANY_LINK_SELECTOR, "href"))
        .and_then(|href| resolve_href(&href, page_url));

    tracing::debug!("Card {:?}: {} ({:?})", name, rating, city);

    ListingCard {
        name,
        rating,
        city,
        price_range,
        cuisine,
        detail_url,
    }
}

/// Finds the next-page URL in the pagination bar
///
/// Only the first link carrying the right-arrow icon is considered.
fn find_next_url(root: ElementRef<'_>, page_url: &Url) -> Option<Url> {
    let next_link = select_all(root, PAGINATION_LINK_SELECTOR)
        .into_iter()
        .find(|link| select_first(*link, NEXT_ICON_SELECTOR).is_some())?;

    let href = next_link.value().attr("href").unwrap_or("").trim();
    let next_url = match resolve_href(href, page_url) {
        Some(url) => url,
        None => {
            tracing::debug!("Next link {:?} is not followable", href);
            return None;
        }
    };

    if is_same_page(&next_url, page_url) {
        tracing::info!("Next link points to the current page; reached the last page");
        return None;
    }

    Some(next_url)
}
