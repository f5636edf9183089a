//! Error type shared by the browser layer and the extractors.
//!
//! Every variant carries owned strings so a failure can be stored inside an
//! [`Extracted::Missing`](crate::models::Extracted) field and compared in tests.

use std::fmt::Display;

/// Failures raised while driving the browser or deriving a value from markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    /// A browser operation (launch, navigate, click, read) failed.
    #[error("browser {op} failed: {message}")]
    Browser { op: String, message: String },

    /// The markup did not contain an element the extractor depends on.
    #[error("no element matching `{selector}`")]
    MissingElement { selector: String },

    /// A CSS selector could not be compiled.
    #[error("invalid selector `{css}`: {message}")]
    Selector { css: String, message: String },

    /// An HTTP fetch failed or returned a non-success status.
    #[error("fetch {url} failed: {message}")]
    Fetch { url: String, message: String },

    /// A fetched table did not have the expected shape.
    #[error("facts table: {message}")]
    Table { message: String },

    /// A link could not be resolved into an absolute URL.
    #[error("invalid url: {message}")]
    Url { message: String },
}

impl ScrapeError {
    pub fn browser(op: impl Into<String>, err: impl Display) -> Self {
        Self::Browser {
            op: op.into(),
            message: err.to_string(),
        }
    }

    pub fn missing(selector: impl Into<String>) -> Self {
        Self::MissingElement {
            selector: selector.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, err: impl Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: err.to_string(),
        }
    }

    pub fn table(message: impl Into<String>) -> Self {
        Self::Table {
            message: message.into(),
        }
    }
}

impl From<url::ParseError> for ScrapeError {
    fn from(e: url::ParseError) -> Self {
        Self::Url {
            message: e.to_string(),
        }
    }
}
