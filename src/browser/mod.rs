//! Browser automation behind a small capability trait.
//!
//! The orchestrator owns exactly one [`BrowserSession`] for the whole run and lends
//! it to each extractor as `&mut`. Extractors never hold on to it past their call.
//!
//! - [`chrome`]: the real session, backed by `headless_chrome`
//! - `fake`: an in-memory session serving canned HTML, used by tests

pub mod chrome;
#[cfg(test)]
pub mod fake;

use crate::error::ScrapeError;
use std::time::Duration;

pub use chrome::{ChromeSession, LaunchConfig};

/// Operations the extractors need from a rendered browser page.
pub trait BrowserSession {
    /// Navigate to `url` and wait for the navigation to settle.
    async fn visit(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Wait up to `wait` for an element matching `css` to appear.
    ///
    /// Returns `Ok(false)` on timeout; errors are reserved for a broken session.
    async fn is_element_present_by_css(
        &mut self,
        css: &str,
        wait: Duration,
    ) -> Result<bool, ScrapeError>;

    /// Click the first element matching `css`.
    async fn click(&mut self, css: &str) -> Result<(), ScrapeError>;

    /// The current page's rendered HTML.
    async fn html(&mut self) -> Result<String, ScrapeError>;

    /// Go back one entry in the session history.
    ///
    /// The previous page may still be loading when this returns.
    async fn back(&mut self) -> Result<(), ScrapeError>;

    /// Release the session and everything it holds.
    async fn close(self) -> Result<(), ScrapeError>
    where
        Self: Sized;
}
