//! Full-resolution hemisphere images from the gallery site.
//!
//! The listing links to one detail page per hemisphere. Each detail page is visited
//! in turn for its download link and title, then the browser goes back to the
//! listing.
//!
//! A missing download link or title only affects that entry. Any other failure
//! while handling an item discards the whole gallery, including entries already
//! collected.

use super::ScrapeConfig;
use crate::browser::BrowserSession;
use crate::error::ScrapeError;
use crate::models::{Extracted, Hemisphere};
use crate::utils::{element_text, select_first, select_within, selector};
use scraper::Html;
use tracing::{debug, info, instrument, warn};
use url::Url;

const ITEM: &str = "div.item";
const ITEM_LINK: &str = "a.itemLink.product-item";
const DOWNLOAD_LINK: &str = "div.downloads li a";
const TITLE: &str = "h2.title";

/// Visit every hemisphere detail page linked from the gallery.
///
/// # Arguments
///
/// * `browser` - Session lent by the orchestrator for the duration of the call
/// * `config` - Supplies the gallery URL and the wait for the listing to re-render
///
/// # Returns
///
/// `Found` with one entry per gallery item, or `Missing` if any item fails.
/// Failing to load the listing itself is returned as an error.
#[instrument(level = "info", skip_all, fields(url = %config.sites.hemispheres))]
pub async fn scrape<B: BrowserSession>(
    browser: &mut B,
    config: &ScrapeConfig,
) -> Result<Extracted<Vec<Hemisphere>>, ScrapeError> {
    let base = Url::parse(&config.sites.hemispheres)?;
    browser.visit(base.as_str()).await?;
    let html = browser.html().await?;

    let detail_urls = match item_links(&html, &base) {
        Ok(urls) => urls,
        Err(e) => {
            warn!(error = %e, "Hemisphere listing unusable; discarding gallery");
            return Ok(Extracted::Missing(e));
        }
    };
    info!(count = detail_urls.len(), "Found hemisphere items");

    let mut hemispheres = Vec::with_capacity(detail_urls.len());
    for (i, detail_url) in detail_urls.into_iter().enumerate() {
        match scrape_item(browser, &detail_url, &base, config).await {
            Ok(hemisphere) => {
                debug!(index = i, title = hemisphere.title_or_sentinel(), "Collected hemisphere");
                hemispheres.push(hemisphere);
            }
            Err(e) => {
                warn!(
                    index = i,
                    %detail_url,
                    error = %e,
                    collected = hemispheres.len(),
                    "Hemisphere item failed; discarding gallery"
                );
                return Ok(Extracted::Missing(e));
            }
        }
    }

    info!(count = hemispheres.len(), "Extracted hemispheres");
    Ok(Extracted::Found(hemispheres))
}

/// Visit one detail page, extract its entry, and return to the listing.
async fn scrape_item<B: BrowserSession>(
    browser: &mut B,
    detail_url: &Url,
    base: &Url,
    config: &ScrapeConfig,
) -> Result<Hemisphere, ScrapeError> {
    browser.visit(detail_url.as_str()).await?;
    let html = browser.html().await?;
    let hemisphere = parse_detail(&html, base);

    browser.back().await?;
    if !browser
        .is_element_present_by_css(ITEM, config.page_wait)
        .await?
    {
        debug!(selector = ITEM, "Listing not rendered after going back");
    }
    Ok(hemisphere)
}

/// Resolve the detail-page link of every gallery item.
///
/// # Arguments
///
/// * `html` - Markup of the gallery listing
/// * `base` - URL the relative links are resolved against
///
/// # Returns
///
/// One absolute URL per `div.item`, in page order. Fails when any item has no
/// link, the same as a failure while visiting it.
pub fn item_links(html: &str, base: &Url) -> Result<Vec<Url>, ScrapeError> {
    let document = Html::parse_document(html);
    let item_sel = selector(ITEM)?;

    document
        .select(&item_sel)
        .map(|item| -> Result<Url, ScrapeError> {
            let href = select_within(item, ITEM_LINK)?
                .value()
                .attr("href")
                .ok_or_else(|| ScrapeError::missing(format!("{ITEM_LINK}[href]")))?;
            Ok(base.join(href)?)
        })
        .collect()
}

/// Extract the full image URL and title from a detail page.
pub fn parse_detail(html: &str, base: &Url) -> Hemisphere {
    let document = Html::parse_document(html);

    let img_url = select_first(&document, DOWNLOAD_LINK)
        .and_then(|a| {
            a.value()
                .attr("href")
                .ok_or_else(|| ScrapeError::missing(format!("{DOWNLOAD_LINK}[href]")))
        })
        .and_then(|href| Ok(base.join(href)?.to_string()));
    let title = select_first(&document, TITLE).map(element_text);

    Hemisphere {
        img_url: img_url.into(),
        title: title.into(),
    }
}
