//! In-memory [`BrowserSession`] serving canned pages.

use super::BrowserSession;
use crate::error::ScrapeError;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, String>,
    after_click: HashMap<(String, String), String>,
    failing: HashSet<String>,
    failing_back: bool,
    failing_html: HashSet<String>,
    history: Vec<String>,
    current: Option<String>,
    current_html: String,
    closed: Rc<Cell<bool>>,
    pub visits: Vec<String>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` when `url` is visited.
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Replace the current page with `html` when `css` is clicked on `url`.
    pub fn on_click(mut self, url: &str, css: &str, html: &str) -> Self {
        self.after_click
            .insert((url.to_string(), css.to_string()), html.to_string());
        self
    }

    /// Make every visit to `url` fail.
    pub fn fail_visit(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Make reading the page HTML fail while `url` is loaded.
    pub fn fail_html(mut self, url: &str) -> Self {
        self.failing_html.insert(url.to_string());
        self
    }

    pub fn fail_back(mut self) -> Self {
        self.failing_back = true;
        self
    }

    /// Shared flag set once [`BrowserSession::close`] runs.
    pub fn closed_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.closed)
    }

    fn has_element(&self, css: &str) -> bool {
        let document = scraper::Html::parse_document(&self.current_html);
        scraper::Selector::parse(css)
            .map(|sel| document.select(&sel).next().is_some())
            .unwrap_or(false)
    }
}

impl BrowserSession for FakeBrowser {
    async fn visit(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.visits.push(url.to_string());
        if self.failing.contains(url) {
            return Err(ScrapeError::browser("visit", format!("refused {url}")));
        }
        let html = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::browser("visit", format!("no page for {url}")))?;
        if let Some(prev) = self.current.replace(url.to_string()) {
            self.history.push(prev);
        }
        self.current_html = html;
        Ok(())
    }

    async fn is_element_present_by_css(
        &mut self,
        css: &str,
        _wait: Duration,
    ) -> Result<bool, ScrapeError> {
        Ok(self.has_element(css))
    }

    async fn click(&mut self, css: &str) -> Result<(), ScrapeError> {
        let url = self.current.clone().unwrap_or_default();
        match self.after_click.get(&(url, css.to_string())) {
            Some(html) => {
                self.current_html = html.clone();
                Ok(())
            }
            None if self.has_element(css) => Ok(()),
            None => Err(ScrapeError::browser("click", format!("nothing at {css}"))),
        }
    }

    async fn html(&mut self) -> Result<String, ScrapeError> {
        if let Some(url) = self
            .current
            .as_ref()
            .filter(|u| self.failing_html.contains(*u))
        {
            return Err(ScrapeError::browser("html", format!("page crashed at {url}")));
        }
        Ok(self.current_html.clone())
    }

    async fn back(&mut self) -> Result<(), ScrapeError> {
        if self.failing_back {
            return Err(ScrapeError::browser("back", "history unavailable"));
        }
        let prev = self
            .history
            .pop()
            .ok_or_else(|| ScrapeError::browser("back", "empty history"))?;
        self.current_html = self.pages.get(&prev).cloned().unwrap_or_default();
        self.current = Some(prev);
        Ok(())
    }

    async fn close(self) -> Result<(), ScrapeError> {
        self.closed.set(true);
        Ok(())
    }
}
