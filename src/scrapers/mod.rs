//! Extractors for the four Mars sites.
//!
//! Each extractor visits one site and derives a typed value from its markup.
//!
//! | Site | Module | Method | Yields |
//! |------|--------|--------|--------|
//! | redplanetscience.com | [`news`] | browser | latest headline and teaser |
//! | spaceimages-mars.com | [`featured_image`] | browser + click | full-size image URL |
//! | galaxyfacts-mars.com | [`facts`] | plain HTTP | styled facts table |
//! | marshemispheres.com | [`hemispheres`] | browser, one visit per item | image URL and title pairs |
//!
//! Extractors return `Ok(Extracted::Missing(..))` when the page lacks what they look
//! for, and `Err(..)` only for failures that should abort the run.

pub mod facts;
pub mod featured_image;
pub mod hemispheres;
pub mod news;

use std::time::Duration;

/// Base URLs of the scraped sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sites {
    pub news: String,
    pub featured_image: String,
    pub facts: String,
    pub hemispheres: String,
}

impl Default for Sites {
    fn default() -> Self {
        Self {
            news: "https://redplanetscience.com/".to_string(),
            featured_image: "https://spaceimages-mars.com".to_string(),
            facts: "https://galaxyfacts-mars.com".to_string(),
            hemispheres: "https://marshemispheres.com/".to_string(),
        }
    }
}

/// Everything an extractor needs besides the browser.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub sites: Sites,
    /// Short fixed wait for content to render after navigation or a click.
    pub page_wait: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            sites: Sites::default(),
            page_wait: Duration::from_millis(1000),
        }
    }
}
