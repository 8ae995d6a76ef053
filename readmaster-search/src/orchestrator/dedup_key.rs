//! Identity keys for cross-source deduplication.
//!
//! Canonicalises a normalized item into a string so that records for
//! the same book (differing only in ISBN punctuation, or in title and
//! author case and spacing) compare as equal.

use crate::types::SearchResultItem;

/// Derive the deduplication key for an item.
///
/// Priority order:
///
/// 1. `isbn13` present → `"isbn:" + digits`.
/// 2. `isbn10` present → `"isbn:" + digits`.
/// 3. Otherwise `"title:<title>|author:<first author>"`, both folded to
///    lowercase with whitespace trimmed and collapsed.
///
/// An ISBN that strips down to nothing is treated as absent.
///
/// # Examples
///
/// ```
/// use readmaster_search::orchestrator::dedup_key::dedup_key;
/// use readmaster_search::{SearchResultItem, Source};
///
/// let mut a = SearchResultItem::new(Source::Google, "a", "Any");
/// a.isbn13 = Some("978-0-13-595705-9".into());
/// let mut b = SearchResultItem::new(Source::OpenLibrary, "b", "Other");
/// b.isbn13 = Some("9780135957059".into());
/// assert_eq!(dedup_key(&a), dedup_key(&b));
/// ```
pub fn dedup_key(item: &SearchResultItem) -> String {
    let isbn = [item.isbn13.as_deref(), item.isbn10.as_deref()]
        .into_iter()
        .flatten()
        .map(strip_isbn)
        .find(|stripped| !stripped.is_empty());
    if let Some(isbn) = isbn {
        return format!("isbn:{isbn}");
    }

    let author = item.authors.first().map(String::as_str).unwrap_or_default();
    format!(
        "title:{}|author:{}",
        fold_text(&item.title),
        fold_text(author)
    )
}

/// Keep ASCII digits and the `X` check character; drop separators.
pub fn strip_isbn(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '0'..='9' | 'X' => Some(c),
            'x' => Some('X'),
            _ => None,
        })
        .collect()
}

/// Lowercase, trim, and collapse whitespace runs to a single space.
pub fn fold_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    fn item(title: &str, author: Option<&str>) -> SearchResultItem {
        let mut item = SearchResultItem::new(Source::Google, "x", title);
        if let Some(author) = author {
            item.authors.push(author.to_string());
        }
        item
    }

    #[test]
    fn isbn13_punctuation_ignored() {
        let mut a = item("A", None);
        a.isbn13 = Some("978-0-13-595705-9".into());
        let mut b = item("B", None);
        b.isbn13 = Some("9780135957059".into());
        assert_eq!(dedup_key(&a), "isbn:9780135957059");
        assert_eq!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn isbn13_preferred_over_isbn10() {
        let mut a = item("A", None);
        a.isbn13 = Some("9780132350884".into());
        a.isbn10 = Some("0132350882".into());
        assert_eq!(dedup_key(&a), "isbn:9780132350884");
    }

    #[test]
    fn isbn10_used_when_no_isbn13() {
        let mut a = item("A", None);
        a.isbn10 = Some("0-13-235088-2".into());
        assert_eq!(dedup_key(&a), "isbn:0132350882");
    }

    #[test]
    fn isbn10_check_character_preserved() {
        let mut a = item("A", None);
        a.isbn10 = Some("0-8044-2957-X".into());
        let mut b = item("B", None);
        b.isbn10 = Some("080442957x".into());
        assert_eq!(dedup_key(&a), "isbn:080442957X");
        assert_eq!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn title_author_fallback_ignores_case_and_spacing() {
        let a = item("  Clean    Code  ", Some("Author"));
        let b = item("Clean Code", Some("Author"));
        assert_eq!(dedup_key(&a), dedup_key(&b));
        assert_eq!(dedup_key(&b), "title:clean code|author:author");
    }

    #[test]
    fn author_case_and_spacing_ignored() {
        let a = item("Dune", Some("  FRANK\tHerbert "));
        let b = item("dune", Some("Frank Herbert"));
        assert_eq!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn missing_author_uses_empty_segment() {
        let a = item("Dune", None);
        assert_eq!(dedup_key(&a), "title:dune|author:");
    }

    #[test]
    fn only_first_author_counts() {
        let mut a = item("Good Omens", Some("Terry Pratchett"));
        a.authors.push("Neil Gaiman".into());
        let b = item("Good Omens", Some("Terry Pratchett"));
        assert_eq!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn different_authors_produce_different_keys() {
        let a = item("Collected Poems", Some("W. H. Auden"));
        let b = item("Collected Poems", Some("Sylvia Plath"));
        assert_ne!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn isbn_without_digits_falls_through() {
        let mut a = item("Dune", Some("Frank Herbert"));
        a.isbn13 = Some("n/a".into());
        assert_eq!(dedup_key(&a), "title:dune|author:frank herbert");
    }

    #[test]
    fn isbn_and_title_keys_never_collide() {
        let mut a = item("A", None);
        a.isbn13 = Some("9780135957059".into());
        let b = item("isbn:9780135957059", None);
        assert_ne!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn strip_isbn_removes_separators() {
        assert_eq!(strip_isbn("978 0 13 595705 9"), "9780135957059");
        assert_eq!(strip_isbn("ISBN 978-0135957059"), "9780135957059");
    }

    #[test]
    fn fold_text_collapses_whitespace() {
        assert_eq!(fold_text("  The   LEFT Hand\nof Darkness "), "the left hand of darkness");
        assert_eq!(fold_text("   "), "");
    }
}
