//! # mars_scrape
//!
//! Scrapes four Mars websites with one headless Chrome session and prints a single
//! JSON record:
//!
//! - latest news headline and teaser (redplanetscience.com)
//! - featured full-size image URL (spaceimages-mars.com)
//! - Mars/Earth facts table as styled HTML (galaxyfacts-mars.com)
//! - hemisphere image URLs and titles (marshemispheres.com)
//!
//! ## Usage
//!
//! ```sh
//! mars_scrape --pretty > mars.json
//! ```
//!
//! Fields that could not be extracted are `null`. Logs go to stderr and are
//! filtered with `RUST_LOG`.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod browser;
mod cli;
mod error;
mod models;
mod scrape;
mod scrapers;
mod utils;

use browser::ChromeSession;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("mars_scrape starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let client = reqwest::Client::builder()
        .user_agent(concat!("mars_scrape/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let session = match ChromeSession::launch(&args.launch_config()).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Could not start Chrome (set --chrome-path or CHROME_PATH)");
            return Err(e.into());
        }
    };

    let result = scrape::scrape_all(session, &client, &args.scrape_config()).await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
