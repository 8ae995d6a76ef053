//! Cache-key derivation and the in-memory result cache.
//!
//! Caches one ranked, windowed result page per distinct effective query.
//! Uses [`moka`] for async-friendly caching with configurable TTL and
//! automatic eviction. The cache is owned by whoever constructs it; there
//! is no process-wide instance.

use std::time::Duration;

use moka::future::Cache;

use crate::config::SearchConfig;
use crate::orchestrator::dedup_key::fold_text;
use crate::query::EffectiveQuery;
use crate::types::SearchResultItem;

/// Prefix shared by every combined-search cache key.
pub const COMBINED_SEARCH_PREFIX: &str = "search:combined";

/// Build the deterministic cache key for a combined search.
///
/// The query text is lowercased, trimmed and whitespace-collapsed, so
/// `"Clean  Code "` and `"clean code"` share a key. Every other field of
/// the effective query is a labelled segment, and free-text values are
/// percent-encoded so `|` can never occur inside a value:
///
/// ```text
/// search:combined:q=clean%20code|limit=10|offset=0|lang=|source=all
/// ```
pub fn build_combined_search_cache_key(query: &EffectiveQuery) -> String {
    let q = fold_text(&query.query);
    let lang = query
        .language
        .as_deref()
        .map(|code| code.trim().to_lowercase())
        .unwrap_or_default();

    format!(
        "{COMBINED_SEARCH_PREFIX}:q={}|limit={}|offset={}|lang={}|source={}",
        urlencoding::encode(&q),
        query.limit,
        query.offset,
        urlencoding::encode(&lang),
        query.source.as_str(),
    )
}

/// In-memory store of combined-search result pages.
///
/// Cloning is cheap and clones share the same underlying storage.
#[derive(Clone)]
pub struct ResultCache {
    inner: Option<Cache<String, Vec<SearchResultItem>>>,
}

impl ResultCache {
    /// Create a cache holding up to `max_entries` pages for `ttl`.
    ///
    /// A zero TTL yields a disabled cache that never stores anything.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        if ttl.is_zero() {
            return Self::disabled();
        }
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { inner: Some(inner) }
    }

    /// Create a cache sized and timed from `config`.
    pub fn with_config(config: &SearchConfig) -> Self {
        Self::new(
            config.cache_max_entries,
            Duration::from_secs(config.cache_ttl_seconds),
        )
    }

    /// A cache that always misses.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Whether this cache stores anything at all.
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Look up a cached page. Returns `None` on miss or when disabled.
    pub async fn get(&self, key: &str) -> Option<Vec<SearchResultItem>> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Store a page under `key`. A no-op when disabled.
    pub async fn insert(&self, key: String, page: Vec<SearchResultItem>) {
        if let Some(cache) = &self.inner {
            cache.insert(key, page).await;
        }
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("enabled", &self.is_enabled())
            .field(
                "entries",
                &self.inner.as_ref().map_or(0, |cache| cache.entry_count()),
            )
            .finish()
    }
}
