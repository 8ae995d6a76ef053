//! Core types for combined book search results and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// The canonical, source-independent record for one book in a result set.
///
/// Every optional attribute is an [`Option`]. `None` means the source did
/// not provide the value and the field is omitted from the serialized
/// record entirely; it is never rendered as `null` or `""`.
///
/// Items are created per request by a normalizer and never outlive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    id: String,
    /// Which provider produced this record.
    pub source: Source,
    /// Book title; never empty.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Author names in source order. May be empty, never absent.
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    /// Subject headings in source order. May be empty, never absent.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Mean rating in `[0, 5]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_full_text: Option<bool>,
    /// Only ever `Some(true)`. A source value of `false` is dropped during
    /// normalization, so `None` means "false or unknown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public_domain: Option<bool>,
}

impl SearchResultItem {
    /// Create an item with only the required fields set.
    ///
    /// The id is derived as `"<source>:<external_id>"` and cannot be
    /// changed afterwards.
    pub fn new(source: Source, external_id: &str, title: impl Into<String>) -> Self {
        Self {
            id: format!("{}:{external_id}", source.as_str()),
            source,
            title: title.into(),
            subtitle: None,
            authors: Vec::new(),
            description: None,
            publisher: None,
            publish_year: None,
            isbn10: None,
            isbn13: None,
            page_count: None,
            categories: Vec::new(),
            average_rating: None,
            ratings_count: None,
            cover_image: None,
            preview_link: None,
            language: None,
            has_full_text: None,
            is_public_domain: None,
        }
    }

    /// Result-set unique identifier, `"<source>:<externalId>"`.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// The two catalog providers the combined search fuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Commercial catalog (Google Books).
    Google,
    /// Library-commons catalog (Open Library).
    #[serde(rename = "openlib")]
    OpenLibrary,
}

impl Source {
    /// Stable identifier used in item ids, cache keys and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenLibrary => "openlib",
        }
    }

    /// Returns both providers in fan-out order.
    pub fn all() -> &'static [Source] {
        &[Self::Google, Self::OpenLibrary]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which providers a query should be sent to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    /// Both providers.
    #[default]
    All,
    Google,
    #[serde(rename = "openlib")]
    OpenLibrary,
}

impl SourceFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Google => "google",
            Self::OpenLibrary => "openlib",
        }
    }

    /// Whether records from `source` are requested by this filter.
    pub fn includes(&self, source: Source) -> bool {
        match self {
            Self::All => true,
            Self::Google => source == Source::Google,
            Self::OpenLibrary => source == Source::OpenLibrary,
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFilter {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "google" => Ok(Self::Google),
            "openlib" => Ok(Self::OpenLibrary),
            other => Err(SearchError::InvalidQuery(format!(
                "source must be one of all, google, openlib (got {other:?})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_derives_prefixed_id() {
        let item = SearchResultItem::new(Source::Google, "xyz789", "Refactoring");
        assert_eq!(item.id(), "google:xyz789");
        let item = SearchResultItem::new(Source::OpenLibrary, "OL45804W", "Refactoring");
        assert_eq!(item.id(), "openlib:OL45804W");
    }

    #[test]
    fn new_item_has_empty_lists_and_no_optionals() {
        let item = SearchResultItem::new(Source::Google, "a", "T");
        assert!(item.authors.is_empty());
        assert!(item.categories.is_empty());
        assert!(item.description.is_none());
        assert!(item.is_public_domain.is_none());
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let item = SearchResultItem::new(Source::Google, "a", "Dune");
        let json = serde_json::to_value(&item).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj["id"], "google:a");
        assert_eq!(obj["source"], "google");
        assert_eq!(obj["title"], "Dune");
        assert_eq!(obj["authors"], serde_json::json!([]));
        assert_eq!(obj["categories"], serde_json::json!([]));
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("coverImage"));
        assert!(!obj.contains_key("isPublicDomain"));
        assert!(obj.values().all(|v| !v.is_null()));
    }

    #[test]
    fn present_fields_use_camel_case() {
        let mut item = SearchResultItem::new(Source::OpenLibrary, "OL1W", "Dune");
        item.publish_year = Some(1965);
        item.cover_image = Some("https://covers.example/1.jpg".into());
        item.has_full_text = Some(false);
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["source"], "openlib");
        assert_eq!(json["publishYear"], 1965);
        assert_eq!(json["coverImage"], "https://covers.example/1.jpg");
        assert_eq!(json["hasFullText"], false);
    }

    #[test]
    fn item_serde_round_trip_keeps_id() {
        let mut item = SearchResultItem::new(Source::Google, "abc", "Test");
        item.average_rating = Some(4.5);
        let json = serde_json::to_string(&item).expect("serialize");
        let decoded: SearchResultItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, item);
        assert_eq!(decoded.id(), "google:abc");
    }

    #[test]
    fn source_display() {
        assert_eq!(Source::Google.to_string(), "google");
        assert_eq!(Source::OpenLibrary.to_string(), "openlib");
    }

    #[test]
    fn source_all() {
        assert_eq!(Source::all(), &[Source::Google, Source::OpenLibrary]);
    }

    #[test]
    fn source_filter_parses_case_insensitively() {
        assert_eq!("ALL".parse::<SourceFilter>().ok(), Some(SourceFilter::All));
        assert_eq!(
            " Google ".parse::<SourceFilter>().ok(),
            Some(SourceFilter::Google)
        );
        assert_eq!(
            "openlib".parse::<SourceFilter>().ok(),
            Some(SourceFilter::OpenLibrary)
        );
    }

    #[test]
    fn source_filter_rejects_unknown() {
        let err = "bing".parse::<SourceFilter>().unwrap_err();
        assert!(err.to_string().contains("source must be one of"));
    }

    #[test]
    fn source_filter_includes() {
        assert!(SourceFilter::All.includes(Source::Google));
        assert!(SourceFilter::All.includes(Source::OpenLibrary));
        assert!(SourceFilter::Google.includes(Source::Google));
        assert!(!SourceFilter::Google.includes(Source::OpenLibrary));
        assert!(!SourceFilter::OpenLibrary.includes(Source::Google));
    }

    #[test]
    fn source_filter_default_is_all() {
        assert_eq!(SourceFilter::default(), SourceFilter::All);
    }
}
