//! Mars/Earth comparison table from the facts site.
//!
//! This extractor does not need the browser: the table is served as static HTML,
//! so it is fetched with `reqwest` and parsed with `scraper`.
//!
//! # Output
//!
//! The first table on the page is re-rendered as a Bootstrap-styled fragment with
//! `Description` as the row header column:
//!
//! ```text
//! <table border="1" class="dataframe table table-striped">
//!   <thead> ... Mars | Earth, then the Description index row ... </thead>
//!   <tbody> one <tr> per fact: <th>description</th><td>mars</td><td>earth</td> </tbody>
//! </table>
//! ```

use crate::error::ScrapeError;
use crate::models::Extracted;
use crate::utils::{html_escape, normalize_ws, selector, truncate_for_log};
use reqwest::Client;
use scraper::{ElementRef, Html};
use tracing::{debug, info, instrument, warn};

/// Column names applied to the fetched table, row header first.
pub const COLUMNS: [&str; 3] = ["Description", "Mars", "Earth"];
/// CSS classes added to the rendered table.
pub const TABLE_CLASSES: &str = "table table-striped";
/// Stands in for an empty or absent cell.
pub const NAN: &str = "NaN";

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    pub description: String,
    pub mars: String,
    pub earth: String,
}

/// The comparison table keyed by description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FactsTable {
    pub rows: Vec<FactRow>,
}

impl FactsTable {
    /// Parse the first `<table>` in `html`.
    ///
    /// Rows in `<thead>`, and leading rows made only of `<th>` cells, are treated as
    /// the source header and replaced by [`COLUMNS`]. Rows without cells are
    /// skipped. Empty cells read as [`NAN`], and short rows are padded with it.
    /// The table must be exactly three columns wide.
    pub fn from_html(html: &str) -> Result<Self, ScrapeError> {
        let document = Html::parse_document(html);
        let table_sel = selector("table")?;
        let row_sel = selector("tr")?;
        let cell_sel = selector("th, td")?;

        let table = document
            .select(&table_sel)
            .next()
            .ok_or_else(|| ScrapeError::table("no tables found"))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut in_header = true;
        for tr in table.select(&row_sel) {
            // Nested tables belong to some other cell.
            if nearest_table(tr).map(|t| t.id()) != Some(table.id()) {
                continue;
            }
            let cells: Vec<ElementRef<'_>> = tr.select(&cell_sel).collect();
            if cells.is_empty() {
                continue;
            }
            if in_header && (in_thead(tr) || is_all_th(&cells)) {
                continue;
            }
            in_header = false;
            rows.push(cells.into_iter().map(cell_text).collect());
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(COLUMNS.len());
        if width != COLUMNS.len() {
            return Err(ScrapeError::table(format!(
                "expected {} columns, found {width}",
                COLUMNS.len()
            )));
        }

        let rows = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(COLUMNS.len(), NAN.to_string());
                let mut cells = cells.into_iter();
                FactRow {
                    description: cells.next().unwrap_or_default(),
                    mars: cells.next().unwrap_or_default(),
                    earth: cells.next().unwrap_or_default(),
                }
            })
            .collect();

        Ok(Self { rows })
    }

    /// Render the table as a styled HTML fragment.
    pub fn to_html(&self, classes: &str) -> String {
        let [index, mars, earth] = COLUMNS;
        let mut out = format!("<table border=\"1\" class=\"dataframe {classes}\">\n");

        out.push_str("  <thead>\n");
        out.push_str("    <tr style=\"text-align: right;\">\n");
        out.push_str("      <th></th>\n");
        out.push_str(&format!("      <th>{mars}</th>\n"));
        out.push_str(&format!("      <th>{earth}</th>\n"));
        out.push_str("    </tr>\n");
        out.push_str("    <tr>\n");
        out.push_str(&format!("      <th>{index}</th>\n"));
        out.push_str("      <th></th>\n");
        out.push_str("      <th></th>\n");
        out.push_str("    </tr>\n");
        out.push_str("  </thead>\n");
        out.push_str("  <tbody>\n");
        for row in &self.rows {
            out.push_str("    <tr>\n");
            out.push_str(&format!(
                "      <th>{}</th>\n",
                html_escape(&row.description)
            ));
            out.push_str(&format!("      <td>{}</td>\n", html_escape(&row.mars)));
            out.push_str(&format!("      <td>{}</td>\n", html_escape(&row.earth)));
            out.push_str("    </tr>\n");
        }
        out.push_str("  </tbody>\n");
        out.push_str("</table>");
        out
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let text = normalize_ws(&cell.text().collect::<String>());
    if text.is_empty() {
        NAN.to_string()
    } else {
        text
    }
}

fn nearest_table(tr: ElementRef<'_>) -> Option<ElementRef<'_>> {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
}

fn in_thead(tr: ElementRef<'_>) -> bool {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "table")
        .any(|el| el.value().name() == "thead")
}

fn is_all_th(cells: &[ElementRef<'_>]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| c.value().name() == "th")
}

/// Fetch the facts page body.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `url` - Page holding the comparison table
///
/// # Returns
///
/// The response body, or a [`ScrapeError::Fetch`] on transport failure or a
/// non-success status.
#[instrument(level = "info", skip(client))]
pub async fn fetch_table_html(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::fetch(url, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::fetch(url, format!("HTTP {status}")));
    }
    let body = response.text().await.map_err(|e| ScrapeError::fetch(url, e))?;
    debug!(bytes = body.len(), "Fetched facts page");
    Ok(body)
}

/// Fetch, parse and render the facts table.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `url` - Page holding the comparison table
///
/// # Returns
///
/// The styled table markup, or `Missing` on any fetch or parse failure. This
/// function never aborts the run.
#[instrument(level = "info", skip(client))]
pub async fn scrape(client: &Client, url: &str) -> Extracted<String> {
    let body = match fetch_table_html(client, url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Facts fetch failed");
            return Extracted::Missing(e);
        }
    };

    match FactsTable::from_html(&body) {
        Ok(table) => {
            info!(rows = table.rows.len(), "Extracted facts table");
            Extracted::Found(table.to_html(TABLE_CLASSES))
        }
        Err(e) => {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 200),
                "Facts table could not be parsed"
            );
            Extracted::Missing(e)
        }
    }
}
