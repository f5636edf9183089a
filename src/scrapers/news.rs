//! Latest headline from the Mars news listing.

use super::ScrapeConfig;
use crate::browser::BrowserSession;
use crate::error::ScrapeError;
use crate::models::{Extracted, NewsTeaser};
use crate::utils::{element_text, select_first, select_within};
use scraper::Html;
use tracing::{info, instrument, warn};

const LIST_TEXT: &str = "div.list_text";
const CONTENT_TITLE: &str = "div.content_title";
const TEASER_BODY: &str = "div.article_teaser_body";

/// Visit the news site and pull the first teaser's title and body.
///
/// # Arguments
///
/// * `browser` - Session lent by the orchestrator for the duration of the call
/// * `config` - Supplies the news URL and the render wait
///
/// # Returns
///
/// `Found` with the first teaser, or `Missing` when the listing lacks a teaser
/// block, title or body. Navigation failures are returned as errors.
#[instrument(level = "info", skip_all, fields(url = %config.sites.news))]
pub async fn scrape<B: BrowserSession>(
    browser: &mut B,
    config: &ScrapeConfig,
) -> Result<Extracted<NewsTeaser>, ScrapeError> {
    browser.visit(&config.sites.news).await?;

    // Optional delay for the listing to render
    if !browser
        .is_element_present_by_css(LIST_TEXT, config.page_wait)
        .await?
    {
        warn!(selector = LIST_TEXT, "News listing did not render in time");
    }

    let html = browser.html().await?;
    let teaser = parse_teaser(&html);
    match &teaser {
        Extracted::Found(t) => info!(title = %t.title, "Extracted news teaser"),
        Extracted::Missing(e) => warn!(error = %e, "News teaser not found"),
    }
    Ok(teaser)
}

/// Parse the first teaser out of the listing markup.
pub fn parse_teaser(html: &str) -> Extracted<NewsTeaser> {
    let document = Html::parse_document(html);
    let teaser = select_first(&document, LIST_TEXT).and_then(|slide| {
        Ok(NewsTeaser {
            title: element_text(select_within(slide, CONTENT_TITLE)?),
            paragraph: element_text(select_within(slide, TEASER_BODY)?),
        })
    });
    teaser.into()
}
