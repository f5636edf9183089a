//! Helpers shared by the extractors.
//!
//! - Selector compilation with errors mapped into [`ScrapeError`]
//! - Element lookup and text collection over parsed documents
//! - Whitespace normalization and HTML escaping for rendered output
//! - String truncation for log previews

use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Compile a CSS selector.
pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css: css.to_string(),
        message: e.to_string(),
    })
}

/// First element in `document` matching `css`.
pub fn select_first<'a>(document: &'a Html, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .ok_or_else(|| ScrapeError::missing(css))
}

/// First descendant of `element` matching `css`.
pub fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let sel = selector(css)?;
    element
        .select(&sel)
        .next()
        .ok_or_else(|| ScrapeError::missing(css))
}

/// All descendant text of `element`, concatenated as-is.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for inclusion in HTML element content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes (backing off to a char boundary) with an
/// ellipsis and the dropped byte count appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
