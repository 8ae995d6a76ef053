//! Google Books normalizer: commercial catalog, flat volume records.
//!
//! The fetch collaborator flattens each Google Books volume (`volumeInfo`,
//! `accessInfo`, industry identifiers) into [`GoogleVolume`] before it
//! reaches this crate. Authors are plain strings; cover art arrives as a
//! set of image-link variants of which only the medium one is used.

use serde::Deserialize;

use crate::types::{SearchResultItem, Source};

use super::{
    lenient, lenient_names, lenient_vec, non_blank, only_true, publish_year, rating, UNTITLED,
};

/// A flattened Google Books volume.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleVolume {
    /// Google volume id, e.g. `"xyz789"`.
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient_names")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub publisher: Option<String>,
    /// Free-form date: `"2019"`, `"2019-09"` or `"2019-09-13"`.
    #[serde(default, deserialize_with = "lenient")]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub isbn10: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub isbn13: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub page_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ratings_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_links: Option<GoogleImageLinks>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub has_full_text: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_public_domain: Option<bool>,
    /// Older spelling of `isPublicDomain`, kept as its own field so a
    /// record carrying both still decodes.
    #[serde(default, deserialize_with = "lenient")]
    pub public_domain: Option<bool>,
}

/// Cover image variants as Google publishes them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleImageLinks {
    #[serde(default, deserialize_with = "lenient")]
    pub small_thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub small: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub large: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub extra_large: Option<String>,
}

/// Map a Google volume into the canonical item shape.
pub fn normalize_google(volume: GoogleVolume) -> SearchResultItem {
    let title = non_blank(volume.title).unwrap_or_else(|| UNTITLED.to_string());
    let mut item = SearchResultItem::new(Source::Google, &volume.id, title);

    item.subtitle = non_blank(volume.subtitle);
    item.authors = volume.authors;
    item.description = non_blank(volume.description);
    item.publisher = non_blank(volume.publisher);
    item.publish_year = volume.published_date.as_deref().and_then(publish_year);
    item.isbn10 = non_blank(volume.isbn10);
    item.isbn13 = non_blank(volume.isbn13);
    item.page_count = volume.page_count;
    item.categories = volume.categories;
    item.average_rating = rating(volume.average_rating);
    item.ratings_count = volume.ratings_count;
    item.cover_image = volume.image_links.and_then(|links| non_blank(links.medium));
    item.preview_link = non_blank(volume.preview_link);
    item.language = non_blank(volume.language);
    item.has_full_text = volume.has_full_text;
    item.is_public_domain =
        only_true(volume.is_public_domain).or(only_true(volume.public_domain));

    item
}
