//! Data models for the scrape record.
//!
//! - [`Extracted`]: per-field outcome, either a value or the reason it is missing
//! - [`NewsTeaser`]: headline and teaser of the latest news item
//! - [`Hemisphere`]: one full-resolution hemisphere image and its title
//! - [`ScrapeResult`]: the flat record returned by a run
//!
//! Missing fields serialize as `null`, except inside hemisphere entries where the
//! sentinel strings [`NO_URL_FOUND`] and [`NO_TITLE_FOUND`] are written instead.

use crate::error::ScrapeError;
use chrono::{DateTime, Local};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Written in place of a hemisphere image URL that could not be extracted.
pub const NO_URL_FOUND: &str = "No URL Found";
/// Written in place of a hemisphere title that could not be extracted.
pub const NO_TITLE_FOUND: &str = "No Title Found";

/// Outcome of extracting a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    /// The value was found on the page.
    Found(T),
    /// Extraction failed; the run continues without this value.
    Missing(ScrapeError),
}

impl<T> Extracted<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Extracted::Found(v) => Some(v),
            Extracted::Missing(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Found(_))
    }

    /// The reason this field is missing, if it is.
    pub fn reason(&self) -> Option<&ScrapeError> {
        match self {
            Extracted::Found(_) => None,
            Extracted::Missing(e) => Some(e),
        }
    }
}

impl<T> From<Result<T, ScrapeError>> for Extracted<T> {
    fn from(r: Result<T, ScrapeError>) -> Self {
        match r {
            Ok(v) => Extracted::Found(v),
            Err(e) => Extracted::Missing(e),
        }
    }
}

impl<T: Serialize> Serialize for Extracted<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Extracted::Found(v) => serializer.serialize_some(v),
            Extracted::Missing(_) => serializer.serialize_none(),
        }
    }
}

/// Headline and teaser body of the first item on the news listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsTeaser {
    pub title: String,
    pub paragraph: String,
}

/// A hemisphere gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hemisphere {
    /// Absolute URL of the full-resolution image.
    pub img_url: Extracted<String>,
    /// Title shown on the detail page.
    pub title: Extracted<String>,
}

impl Hemisphere {
    pub fn img_url_or_sentinel(&self) -> &str {
        self.img_url.found().map_or(NO_URL_FOUND, String::as_str)
    }

    pub fn title_or_sentinel(&self) -> &str {
        self.title.found().map_or(NO_TITLE_FOUND, String::as_str)
    }
}

impl Serialize for Hemisphere {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Hemisphere", 2)?;
        s.serialize_field("img_url", self.img_url_or_sentinel())?;
        s.serialize_field("title", self.title_or_sentinel())?;
        s.end()
    }
}

/// The record produced by one scrape run.
///
/// Built once by the orchestrator and never mutated afterwards. All six fields are
/// always present in the serialized form, whichever extractors failed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScrapeResult {
    pub news_title: Extracted<String>,
    pub news_paragraph: Extracted<String>,
    /// Absolute URL of the full-size featured image.
    pub featured_image: Extracted<String>,
    /// Styled HTML table fragment.
    pub facts_table: Extracted<String>,
    /// Local wall-clock time at which the record was assembled.
    pub last_modified: DateTime<Local>,
    pub hemispheres: Extracted<Vec<Hemisphere>>,
}

impl ScrapeResult {
    /// Assemble a record, splitting the news teaser into its two fields.
    pub fn assemble(
        news: Extracted<NewsTeaser>,
        featured_image: Extracted<String>,
        facts_table: Extracted<String>,
        hemispheres: Extracted<Vec<Hemisphere>>,
    ) -> Self {
        let (news_title, news_paragraph) = match news {
            Extracted::Found(teaser) => (
                Extracted::Found(teaser.title),
                Extracted::Found(teaser.paragraph),
            ),
            Extracted::Missing(e) => (Extracted::Missing(e.clone()), Extracted::Missing(e)),
        };

        Self {
            news_title,
            news_paragraph,
            featured_image,
            facts_table,
            last_modified: Local::now(),
            hemispheres,
        }
    }

    /// Number of top-level fields that were extracted successfully.
    pub fn found_count(&self) -> usize {
        [
            self.news_title.is_found(),
            self.news_paragraph.is_found(),
            self.featured_image.is_found(),
            self.facts_table.is_found(),
            self.hemispheres.is_found(),
        ]
        .into_iter()
        .filter(|found| *found)
        .count()
    }

    /// Names of the fields that are missing, with the reason for each.
    pub fn missing_fields(&self) -> Vec<(&'static str, &ScrapeError)> {
        [
            ("news_title", self.news_title.reason()),
            ("news_paragraph", self.news_paragraph.reason()),
            ("featured_image", self.featured_image.reason()),
            ("facts_table", self.facts_table.reason()),
            ("hemispheres", self.hemispheres.reason()),
        ]
        .into_iter()
        .filter_map(|(name, reason)| reason.map(|r| (name, r)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn missing<T>() -> Extracted<T> {
        Extracted::Missing(ScrapeError::missing("div.item"))
    }

    #[test]
    fn test_extracted_serializes_found_and_missing() {
        let found: Extracted<String> = Extracted::Found("x".to_string());
        assert_eq!(serde_json::to_string(&found).unwrap(), "\"x\"");
        assert_eq!(serde_json::to_string(&missing::<String>()).unwrap(), "null");
    }

    #[test]
    fn test_extracted_from_result() {
        let ok: Extracted<u8> = Ok(3).into();
        assert_eq!(ok.found(), Some(&3));

        let err: Extracted<u8> = Err(ScrapeError::missing("h2.title")).into();
        assert!(!err.is_found());
        assert_eq!(err.reason(), Some(&ScrapeError::missing("h2.title")));
    }

    #[test]
    fn test_hemisphere_serializes_sentinels() {
        let hemi = Hemisphere {
            img_url: missing(),
            title: missing(),
        };
        let json = serde_json::to_value(&hemi).unwrap();
        assert_eq!(json["img_url"], "No URL Found");
        assert_eq!(json["title"], "No Title Found");

        let hemi = Hemisphere {
            img_url: Extracted::Found("https://marshemispheres.com/images/a.jpg".into()),
            title: Extracted::Found("Cerberus Hemisphere Enhanced".into()),
        };
        let json = serde_json::to_value(&hemi).unwrap();
        assert_eq!(json["img_url"], "https://marshemispheres.com/images/a.jpg");
        assert_eq!(json["title"], "Cerberus Hemisphere Enhanced");
    }

    #[test]
    fn test_assemble_splits_news_teaser() {
        let result = ScrapeResult::assemble(
            Extracted::Found(NewsTeaser {
                title: "Title A".into(),
                paragraph: "Body A".into(),
            }),
            missing(),
            missing(),
            Extracted::Found(vec![]),
        );

        assert_eq!(result.news_title.found().map(String::as_str), Some("Title A"));
        assert_eq!(
            result.news_paragraph.found().map(String::as_str),
            Some("Body A")
        );
        assert_eq!(result.found_count(), 3);
    }

    #[test]
    fn test_result_always_has_all_fields() {
        let result = ScrapeResult::assemble(missing(), missing(), missing(), missing());
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "news_title",
            "news_paragraph",
            "featured_image",
            "facts_table",
            "last_modified",
            "hemispheres",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj.len(), 6);
        assert!(obj["news_title"].is_null());
        assert!(obj["hemispheres"].is_null());
        assert!(obj["last_modified"].is_string());
        assert_eq!(result.found_count(), 0);
        assert_eq!(result.missing_fields().len(), 5);
    }
}
