//! Command-line interface definitions for mars_scrape.
//!
//! Every option can also be set through an environment variable. The scraped
//! sites themselves are fixed and cannot be overridden here.

use crate::browser::LaunchConfig;
use crate::scrapers::ScrapeConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for mars_scrape.
///
/// # Examples
///
/// ```sh
/// # Scrape with an auto-detected headless Chrome
/// mars_scrape
///
/// # Watch the browser work, with a longer render wait
/// mars_scrape --headful --wait-ms 3000 --pretty
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the Chrome or Chromium executable (auto-detected when omitted)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Show the browser window instead of running headless
    #[arg(long, env = "MARS_SCRAPE_HEADFUL")]
    pub headful: bool,

    /// Milliseconds to wait for page content to render
    #[arg(long, env = "MARS_SCRAPE_WAIT_MS", default_value_t = 1000)]
    pub wait_ms: u64,

    /// Pretty-print the JSON record
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn launch_config(&self) -> LaunchConfig {
        LaunchConfig {
            headless: !self.headful,
            chrome_path: self.chrome_path.clone(),
            ..LaunchConfig::default()
        }
    }

    pub fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            page_wait: Duration::from_millis(self.wait_ms),
            ..ScrapeConfig::default()
        }
    }
}
