//! Deterministic multi-key ordering of deduplicated results.

use std::cmp::Ordering;

use crate::types::SearchResultItem;

use super::scoring::calculate_score;

/// Order items for display.
///
/// Tiers, applied until one disambiguates:
///
/// 1. items with a cover image before items without one;
/// 2. higher [`calculate_score`] first;
/// 3. higher `ratings_count` first (absent counts as 0);
/// 4. input order (the sort is stable).
///
/// Scores are computed once per item, not once per comparison.
pub fn rank(items: Vec<SearchResultItem>) -> Vec<SearchResultItem> {
    let mut decorated: Vec<(f64, SearchResultItem)> = items
        .into_iter()
        .map(|item| (calculate_score(&item), item))
        .collect();

    // `sort_by` is stable, which tier 4 relies on.
    decorated.sort_by(|(score_a, a), (score_b, b)| compare(a, *score_a, b, *score_b));

    decorated.into_iter().map(|(_, item)| item).collect()
}

fn compare(a: &SearchResultItem, score_a: f64, b: &SearchResultItem, score_b: f64) -> Ordering {
    b.cover_image
        .is_some()
        .cmp(&a.cover_image.is_some())
        .then_with(|| score_b.total_cmp(&score_a))
        .then_with(|| {
            b.ratings_count
                .unwrap_or(0)
                .cmp(&a.ratings_count.unwrap_or(0))
        })
}
