//! Open Library normalizer: library-commons catalog.
//!
//! Open Library documents use snake_case keys, carry authors as objects
//! (`{"key": "/authors/OL1A", "name": "..."}`), supply ISBNs and
//! publishers as arrays, and reference cover art by numeric id.

use serde::Deserialize;

use crate::orchestrator::dedup_key::strip_isbn;
use crate::types::{SearchResultItem, Source};

use super::{
    first_of, lenient, lenient_names, lenient_vec, non_blank, non_empty_or, only_true,
    publish_year, rating, UNTITLED,
};

/// Cover URL template; `{id}` is replaced by the numeric cover id.
pub const COVER_URL_TEMPLATE: &str = "https://covers.openlibrary.org/b/id/{id}-M.jpg";

/// An Open Library work or edition document.
///
/// The works/editions API and the search API spell several fields
/// differently (`publishers` / `publisher`, `cover_id` / `cover_i`, ...).
/// Each spelling is its own field so a document carrying both still
/// decodes; the normalizer prefers the editions spelling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenLibraryDoc {
    /// Document key, e.g. `"/works/OL45804W"`.
    pub key: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub authors: Vec<OpenLibraryAuthor>,
    /// Plain author names, as returned by the search endpoint.
    #[serde(default, deserialize_with = "lenient_names")]
    pub author_name: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub publishers: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub publisher: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub publish_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_publish_year: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<OpenLibraryText>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub isbn10: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub isbn_10: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub isbn13: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub isbn_13: Vec<String>,
    /// Mixed ISBN-10 and ISBN-13 list from the search endpoint.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub isbn: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub number_of_pages: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub number_of_pages_median: Option<u32>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub subjects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub subject: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_i: Option<i64>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub language: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ratings_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ratings_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_fulltext: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub public_scan: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub public_scan_b: Option<bool>,
}

/// An author entry: an object with a `name`, a bare name, or anything
/// else (`null`, a number), which counts as an unnamed author.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenLibraryAuthor {
    Named {
        #[serde(default, deserialize_with = "lenient")]
        name: Option<String>,
    },
    Plain(String),
    Other(serde_json::Value),
}

impl OpenLibraryAuthor {
    /// The author's name; a missing name is the empty string.
    pub fn into_name(self) -> String {
        match self {
            Self::Named { name } => name.unwrap_or_default(),
            Self::Plain(name) => name,
            Self::Other(_) => String::new(),
        }
    }
}

/// Open Library text fields come either as a string or as
/// `{"type": "/type/text", "value": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenLibraryText {
    Plain(String),
    Typed { value: String },
}

impl OpenLibraryText {
    pub fn into_string(self) -> String {
        match self {
            Self::Plain(text) | Self::Typed { value: text } => text,
        }
    }
}

/// Map an Open Library document into the canonical item shape.
pub fn normalize_openlibrary(doc: OpenLibraryDoc) -> SearchResultItem {
    let key = doc.key.trim_end_matches('/');
    let external_id = key.rsplit('/').next().unwrap_or(key);
    let title = non_blank(doc.title).unwrap_or_else(|| UNTITLED.to_string());
    let mut item = SearchResultItem::new(Source::OpenLibrary, external_id, title);

    item.subtitle = non_blank(doc.subtitle);
    item.authors = if doc.authors.is_empty() {
        doc.author_name
    } else {
        doc.authors
            .into_iter()
            .map(OpenLibraryAuthor::into_name)
            .collect()
    };
    item.description = non_blank(doc.description.map(OpenLibraryText::into_string));
    item.publisher = first_of(doc.publishers).or_else(|| first_of(doc.publisher));
    item.publish_year = doc
        .publish_date
        .as_deref()
        .and_then(publish_year)
        .or(doc.first_publish_year);
    item.isbn10 = first_of(doc.isbn10)
        .or_else(|| first_of(doc.isbn_10))
        .or_else(|| isbn_of_length(&doc.isbn, 10));
    item.isbn13 = first_of(doc.isbn13)
        .or_else(|| first_of(doc.isbn_13))
        .or_else(|| isbn_of_length(&doc.isbn, 13));
    item.page_count = doc.number_of_pages.or(doc.number_of_pages_median);
    item.categories = non_empty_or(doc.subjects, doc.subject);
    item.average_rating = rating(doc.ratings_average);
    item.ratings_count = doc.ratings_count;
    item.cover_image = doc
        .cover_id
        .and_then(cover_url)
        .or_else(|| doc.cover_i.and_then(cover_url));
    item.preview_link = non_blank(doc.preview_url);
    item.language = first_of(doc.languages).or_else(|| first_of(doc.language));
    item.has_full_text = doc.has_fulltext;
    item.is_public_domain = only_true(doc.public_scan).or(only_true(doc.public_scan_b));

    item
}

/// First entry of a mixed ISBN list that strips to `length` characters.
fn isbn_of_length(isbns: &[String], length: usize) -> Option<String> {
    isbns
        .iter()
        .find(|isbn| strip_isbn(isbn).len() == length)
        .and_then(|isbn| non_blank(Some(isbn.clone())))
}

/// Render a cover URL from a cover id. Open Library uses `-1` (and other
/// non-positive values) for "no cover".
pub fn cover_url(cover_id: i64) -> Option<String> {
    (cover_id > 0).then(|| COVER_URL_TEMPLATE.replace("{id}", &cover_id.to_string()))
}
