//! Completeness-weighted scoring for book results.
//!
//! Assigns a score from the optional fields an item carries:
//! - Description and cover image weigh the most
//! - A full-text flag of `true` adds a fixed bonus
//! - Every other populated field adds a smaller, equal increment
//!
//! Every weight is positive, so adding a field never lowers a score.

use crate::types::SearchResultItem;

/// Weight for `description` and `cover_image`.
pub const MAJOR_FIELD_WEIGHT: f64 = 3.0;
/// Bonus when `has_full_text` is `true`.
pub const FULL_TEXT_BONUS: f64 = 2.0;
/// Weight for each other populated optional scalar.
pub const MINOR_FIELD_WEIGHT: f64 = 1.0;
/// Weight for non-empty `authors` and non-empty `categories`.
pub const LIST_WEIGHT: f64 = 0.5;
/// Weight for `subtitle` and a `true` public-domain flag.
pub const MARGINAL_WEIGHT: f64 = 0.25;

/// Calculate the score for an item.
///
/// # Scoring Formula
///
/// ```text
/// score = 3.0 * (description + cover_image)
///       + 2.0 * (has_full_text == true)
///       + 1.0 * (publisher + publish_year + page_count + language
///                + average_rating + ratings_count + preview_link
///                + isbn10 + isbn13)
///       + 0.5 * (authors non-empty + categories non-empty)
///       + 0.25 * (subtitle + is_public_domain == true)
/// ```
///
/// Pure and deterministic; the result is never negative.
pub fn calculate_score(item: &SearchResultItem) -> f64 {
    let major = [item.description.is_some(), item.cover_image.is_some()];
    let minor = [
        item.publisher.is_some(),
        item.publish_year.is_some(),
        item.page_count.is_some(),
        item.language.is_some(),
        item.average_rating.is_some(),
        item.ratings_count.is_some(),
        item.preview_link.is_some(),
        item.isbn10.is_some(),
        item.isbn13.is_some(),
    ];
    let lists = [!item.authors.is_empty(), !item.categories.is_empty()];
    let marginal = [
        item.subtitle.is_some(),
        item.is_public_domain == Some(true),
    ];

    let mut score = weighted(&major, MAJOR_FIELD_WEIGHT)
        + weighted(&minor, MINOR_FIELD_WEIGHT)
        + weighted(&lists, LIST_WEIGHT)
        + weighted(&marginal, MARGINAL_WEIGHT);
    if item.has_full_text == Some(true) {
        score += FULL_TEXT_BONUS;
    }
    score
}

fn weighted(flags: &[bool], weight: f64) -> f64 {
    flags.iter().filter(|set| **set).count() as f64 * weight
}
