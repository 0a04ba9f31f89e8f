//! HTML utility functions for selecting cells and reading their text.

use scraper::{ElementRef, Html, Selector};

/// Non-breaking space as it appears in volby.cz number formatting ("1&nbsp;234").
pub const NBSP: char = '\u{a0}';

/// Parse a CSS selector that is known at compile time.
///
/// # Panics
/// Panics if `css` is not a valid selector. Only call with static strings.
#[allow(clippy::expect_used)] // Static selectors that are guaranteed to be valid
pub fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Replace non-breaking spaces with ordinary spaces. No other cleanup.
///
/// # Examples
/// ```
/// use volby_scraper::html::normalize_text;
///
/// assert_eq!(normalize_text("1\u{a0}234"), "1 234");
/// assert_eq!(normalize_text(" 12 "), " 12 ");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.replace(NBSP, " ")
}

/// Full text content of an element, normalized.
pub fn cell_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}

/// Normalized text of every element matching `selector`, in document order.
pub fn select_texts(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector).map(cell_text).collect()
}

/// Like [`select_texts`], with surrounding whitespace trimmed.
pub fn select_trimmed_texts(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(|el| cell_text(el).trim().to_string())
        .collect()
}

/// Check whether an element's `headers` attribute equals one of `ids` exactly.
pub fn has_headers(element: ElementRef<'_>, ids: &[&str]) -> bool {
    element
        .value()
        .attr("headers")
        .is_some_and(|h| ids.contains(&h))
}
