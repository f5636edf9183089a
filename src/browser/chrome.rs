//! Chrome-backed [`BrowserSession`].
//!
//! `headless_chrome` is a blocking API. Each call is moved onto tokio's blocking pool
//! and awaited right away, so only one browser operation is ever in flight.
//! Dropping the session kills the Chrome process, which also covers early returns.

use super::BrowserSession;
use crate::error::ScrapeError;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How to launch the browser.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Run without a visible window.
    pub headless: bool,
    /// Explicit Chrome/Chromium executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// How long Chrome may sit idle before `headless_chrome` tears it down.
    pub idle_timeout: Duration,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            idle_timeout: Duration::from_secs(120),
        }
    }
}

/// A single Chrome instance with one tab.
pub struct ChromeSession {
    // Field order matters: the tab is dropped before the browser that owns it.
    tab: Arc<Tab>,
    browser: Browser,
}

impl ChromeSession {
    /// Launch Chrome and open the tab every extractor will share.
    #[instrument(level = "info", skip_all, fields(headless = config.headless))]
    pub async fn launch(config: &LaunchConfig) -> Result<Self, ScrapeError> {
        let config = config.clone();
        let (browser, tab) = tokio::task::spawn_blocking(move || {
            let options = LaunchOptions::default_builder()
                .headless(config.headless)
                .path(config.chrome_path)
                .idle_browser_timeout(config.idle_timeout)
                .build()
                .map_err(|e| ScrapeError::browser("launch", e))?;
            let browser = Browser::new(options).map_err(|e| ScrapeError::browser("launch", e))?;
            let tab = browser
                .new_tab()
                .map_err(|e| ScrapeError::browser("new_tab", e))?;
            Ok::<_, ScrapeError>((browser, tab))
        })
        .await
        .map_err(|e| ScrapeError::browser("launch", e))??;

        info!("Chrome session started");
        Ok(Self { tab, browser })
    }

    /// Run a blocking tab operation on the blocking pool.
    async fn on_tab<T, F>(&self, op: &'static str, f: F) -> Result<T, ScrapeError>
    where
        T: Send + 'static,
        F: FnOnce(&Tab) -> anyhow::Result<T> + Send + 'static,
    {
        let tab = Arc::clone(&self.tab);
        tokio::task::spawn_blocking(move || f(&tab))
            .await
            .map_err(|e| ScrapeError::browser(op, e))?
            .map_err(|e| ScrapeError::browser(op, e))
    }
}

impl BrowserSession for ChromeSession {
    #[instrument(level = "debug", skip(self))]
    async fn visit(&mut self, url: &str) -> Result<(), ScrapeError> {
        let target = url.to_string();
        self.on_tab("visit", move |tab| {
            tab.navigate_to(&target)?.wait_until_navigated()?;
            Ok(())
        })
        .await
    }

    #[instrument(level = "debug", skip(self))]
    async fn is_element_present_by_css(
        &mut self,
        css: &str,
        wait: Duration,
    ) -> Result<bool, ScrapeError> {
        let css = css.to_string();
        let present = self
            .on_tab("wait_for_element", move |tab| {
                Ok(tab.wait_for_element_with_custom_timeout(&css, wait).is_ok())
            })
            .await?;
        debug!(present, "Element presence checked");
        Ok(present)
    }

    #[instrument(level = "debug", skip(self))]
    async fn click(&mut self, css: &str) -> Result<(), ScrapeError> {
        let css = css.to_string();
        self.on_tab("click", move |tab| {
            tab.find_element(&css)?.click()?;
            Ok(())
        })
        .await
    }

    async fn html(&mut self) -> Result<String, ScrapeError> {
        self.on_tab("html", |tab| tab.get_content()).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn back(&mut self) -> Result<(), ScrapeError> {
        // history.back() only queues the navigation, so wait_until_navigated can
        // return before the previous page starts loading. Callers that need the
        // old page wait for one of its elements.
        self.on_tab("back", |tab| {
            tab.evaluate("window.history.back()", false)?;
            tab.wait_until_navigated()?;
            Ok(())
        })
        .await
    }

    async fn close(self) -> Result<(), ScrapeError> {
        let Self { tab, browser } = self;
        tokio::task::spawn_blocking(move || {
            let closed = tab.close(true);
            drop(tab);
            drop(browser);
            closed
        })
        .await
        .map_err(|e| ScrapeError::browser("close", e))?
        .map_err(|e| ScrapeError::browser("close", e))?;

        info!("Chrome session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_launch_config_is_headless() {
        let config = LaunchConfig::default();
        assert!(config.headless);
        assert!(config.chrome_path.is_none());
        assert_eq!(config.idle_timeout, Duration::from_secs(120));
    }
}
