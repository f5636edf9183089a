//! Featured full-size image from the space images site.
//!
//! The full image only appears after clicking the "FULL IMAGE" button, located by
//! [`FULL_IMAGE_BUTTON`]. That selector couples us to the site's current markup; if
//! the layout changes the extractor reports `Missing` instead of clicking something
//! else.

use super::ScrapeConfig;
use crate::browser::BrowserSession;
use crate::error::ScrapeError;
use crate::models::Extracted;
use crate::utils::select_first;
use scraper::Html;
use tracing::{info, instrument, warn};

/// The button that opens the full-size image viewer.
pub const FULL_IMAGE_BUTTON: &str = "div.floating_text_area button";
const FANCYBOX_IMAGE: &str = "img.fancybox-image";

/// Reveal the full-size image and return its absolute URL.
///
/// # Arguments
///
/// * `browser` - Session lent by the orchestrator for the duration of the call
/// * `config` - Supplies the image site URL and the render wait
///
/// # Returns
///
/// `Found` with `{base}/{src}`, or `Missing` when the full image button or the
/// revealed image cannot be found. Navigation and click failures are returned
/// as errors.
#[instrument(level = "info", skip_all, fields(url = %config.sites.featured_image))]
pub async fn scrape<B: BrowserSession>(
    browser: &mut B,
    config: &ScrapeConfig,
) -> Result<Extracted<String>, ScrapeError> {
    let base = &config.sites.featured_image;
    browser.visit(base).await?;

    if !browser
        .is_element_present_by_css(FULL_IMAGE_BUTTON, config.page_wait)
        .await?
    {
        warn!(selector = FULL_IMAGE_BUTTON, "Full image button not found");
        return Ok(Extracted::Missing(ScrapeError::missing(FULL_IMAGE_BUTTON)));
    }
    browser.click(FULL_IMAGE_BUTTON).await?;
    browser
        .is_element_present_by_css(FANCYBOX_IMAGE, config.page_wait)
        .await?;

    let html = browser.html().await?;
    let image = parse_image_url(&html, base);
    match &image {
        Extracted::Found(url) => info!(%url, "Extracted featured image"),
        Extracted::Missing(e) => warn!(error = %e, "Featured image not found"),
    }
    Ok(image)
}

/// Find the revealed image and prefix its `src` with `base`.
///
/// The two are joined with a literal `/`, so a root-relative `src` keeps its
/// leading slash (`https://host//img.jpg`), which servers resolve the same way.
pub fn parse_image_url(html: &str, base: &str) -> Extracted<String> {
    let document = Html::parse_document(html);
    select_first(&document, FANCYBOX_IMAGE)
        .and_then(|img| {
            img.value()
                .attr("src")
                .map(|src| format!("{base}/{src}"))
                .ok_or_else(|| ScrapeError::missing(format!("{FANCYBOX_IMAGE}[src]")))
        })
        .into()
}
