//! Result deduplication by identity key.
//!
//! Groups items that refer to the same book (see [`dedup_key`]) and keeps
//! one full record per group: the most complete candidate. No field-level
//! splicing happens; the survivor is always a single source record.

use std::collections::HashMap;

use crate::types::SearchResultItem;

use super::dedup_key::dedup_key;

/// Count the populated optional fields on an item.
///
/// Scalars counted: description, cover image, both ISBNs, page count,
/// publisher, publish year, average rating, ratings count, preview link,
/// language. Non-empty `authors` and non-empty `categories` add one each.
/// Only used to decide merge collisions; never exposed to callers.
pub fn completeness(item: &SearchResultItem) -> usize {
    let scalars = [
        item.description.is_some(),
        item.cover_image.is_some(),
        item.isbn10.is_some(),
        item.isbn13.is_some(),
        item.page_count.is_some(),
        item.publisher.is_some(),
        item.publish_year.is_some(),
        item.average_rating.is_some(),
        item.ratings_count.is_some(),
        item.preview_link.is_some(),
        item.language.is_some(),
    ];
    let lists = [!item.authors.is_empty(), !item.categories.is_empty()];
    scalars.iter().chain(lists.iter()).filter(|set| **set).count()
}

/// Collapse duplicates, keeping the most complete record of each group.
///
/// Single pass. Output order is the order in which each key was first
/// seen. A later duplicate replaces the current winner only when its
/// [`completeness`] is strictly greater, so ties keep the first-seen
/// record.
pub fn deduplicate(items: Vec<SearchResultItem>) -> Vec<SearchResultItem> {
    // Map from dedup key → index of the group's slot in `winners`.
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut winners: Vec<(SearchResultItem, usize)> = Vec::with_capacity(items.len());

    for item in items {
        let key = dedup_key(&item);
        let count = completeness(&item);

        match slots.get(&key) {
            Some(&slot) => {
                let (winner, winner_count) = &mut winners[slot];
                if count > *winner_count {
                    tracing::trace!(
                        replaced = winner.id(),
                        by = item.id(),
                        "richer duplicate displaces winner"
                    );
                    *winner = item;
                    *winner_count = count;
                }
            }
            None => {
                slots.insert(key, winners.len());
                winners.push((item, count));
            }
        }
    }

    winners.into_iter().map(|(item, _)| item).collect()
}
