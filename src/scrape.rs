//! Scrape orchestration.
//!
//! One browser session is owned here for the whole run. Extractors run in a fixed
//! order: news, featured image, facts, hemispheres. The session is closed on
//! every exit path before the outcome is returned.

use crate::browser::BrowserSession;
use crate::error::ScrapeError;
use crate::models::ScrapeResult;
use crate::scrapers::{self, ScrapeConfig};
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Run every extractor against `browser`, then close it.
///
/// Extractor failures that are caught show up as missing fields. Anything that
/// propagates aborts the run and no partial record is returned.
#[instrument(level = "info", skip_all)]
pub async fn scrape_all<B: BrowserSession>(
    mut browser: B,
    client: &Client,
    config: &ScrapeConfig,
) -> Result<ScrapeResult, ScrapeError> {
    let outcome = run_extractors(&mut browser, client, config).await;

    if let Err(e) = browser.close().await {
        warn!(error = %e, "Failed to close browser session cleanly");
    }

    match &outcome {
        Ok(result) => {
            for (field, reason) in result.missing_fields() {
                warn!(field, error = %reason, "Field missing from record");
            }
            info!(found = result.found_count(), "Scrape complete");
        }
        Err(e) => warn!(error = %e, "Scrape aborted"),
    }
    outcome
}

async fn run_extractors<B: BrowserSession>(
    browser: &mut B,
    client: &Client,
    config: &ScrapeConfig,
) -> Result<ScrapeResult, ScrapeError> {
    let news = scrapers::news::scrape(browser, config).await?;
    let featured_image = scrapers::featured_image::scrape(browser, config).await?;
    let facts_table = scrapers::facts::scrape(client, &config.sites.facts).await;
    let hemispheres = scrapers::hemispheres::scrape(browser, config).await?;

    Ok(ScrapeResult::assemble(
        news,
        featured_image,
        facts_table,
        hemispheres,
    ))
}
