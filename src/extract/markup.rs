//! Thin helpers over `scraper` selection
//!
//! Selectors that fail to parse are treated as matching nothing, so a typo in
//! a selector degrades to an absent field rather than a panic.

use scraper::{ElementRef, Selector};

/// Returns all elements under `scope` matching `css`, in document order
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => {
            tracing::debug!("Invalid selector: {}", css);
            Vec::new()
        }
    }
}

/// Returns the first element under `scope` matching `css`
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

/// Returns the text content of an element with surrounding whitespace stripped
///
/// Text nodes are trimmed individually and joined by a single space.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the raw, unnormalized text content of an element
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Returns the stripped text of the first match, if it is non-empty
pub fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css)
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Returns an attribute of an element, if present and non-blank
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Returns an attribute of the first match, if present and non-blank
pub fn first_attr(scope: ElementRef<'_>, css: &str, name: &str) -> Option<String> {
    select_first(scope, css).and_then(|element| attr(element, name))
}
