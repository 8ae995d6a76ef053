//! Core search orchestrator: concurrent provider fan-out, normalize, fuse.
//!
//! Queries the selected providers concurrently, each under its own time
//! box, normalizes whatever records arrive, then deduplicates, ranks and
//! windows them. A provider that fails or times out contributes nothing;
//! the other provider's results are still returned.

use std::time::Duration;

use crate::cache::{build_combined_search_cache_key, ResultCache};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::{BookProvider, ProviderRequest};
use crate::query::SearchParams;
use crate::sources::SourceRecord;
use crate::types::{SearchResultItem, Source, SourceFilter};

use super::dedup::deduplicate;
use super::ranking::rank;

/// Normalize raw records into canonical items, preserving order.
pub fn normalize_all(records: Vec<SourceRecord>) -> Vec<SearchResultItem> {
    records.into_iter().map(SourceRecord::normalize).collect()
}

/// Run the fusion pipeline over already-normalized items.
///
/// # Pipeline
///
/// 1. Deduplicate, keeping the most complete record per book
/// 2. Rank (cover first, then score, then ratings count)
/// 3. Skip `offset` items and keep at most `limit`
///
/// Pure and synchronous. Empty in, empty out.
pub fn fuse(items: Vec<SearchResultItem>, offset: usize, limit: usize) -> Vec<SearchResultItem> {
    let merged = deduplicate(items);
    let merged_count = merged.len();
    let page: Vec<SearchResultItem> = rank(merged).into_iter().skip(offset).take(limit).collect();
    tracing::debug!(merged_count, offset, limit, returned = page.len(), "fused results");
    page
}

/// Orchestrate a combined search across both providers.
///
/// # Pipeline
///
/// 1. Validate `params` against `config`
/// 2. Return the cached page if the effective query was seen recently
/// 3. Fetch from the providers selected by `params.source` concurrently,
///    each wrapped in a `provider_timeout_seconds` time box
/// 4. Log per-provider failures at warn level; they contribute no records
/// 5. Normalize, then [`fuse`] into the requested page
/// 6. Cache the page, unless every selected provider failed
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] if `params` fail validation.
/// Provider failures never surface as errors.
pub async fn orchestrate_search<G, O>(
    params: &SearchParams,
    google: &G,
    openlib: &O,
    cache: &ResultCache,
    config: &SearchConfig,
) -> Result<Vec<SearchResultItem>, SearchError>
where
    G: BookProvider,
    O: BookProvider,
{
    let query = params.validate(config)?;
    tracing::trace!(query = %query.query, "combined search");

    let key = build_combined_search_cache_key(&query);
    if let Some(page) = cache.get(&key).await {
        tracing::debug!(count = page.len(), "combined search cache hit");
        return Ok(page);
    }

    let request = ProviderRequest::for_query(&query);
    let time_box = Duration::from_secs(config.provider_timeout_seconds);

    // 1. Fan out to the selected providers concurrently.
    let (google_outcome, openlib_outcome) = futures::future::join(
        fetch_if_selected(google, query.source, &request, time_box),
        fetch_if_selected(openlib, query.source, &request, time_box),
    )
    .await;

    // 2. Collect records, logging failures.
    let mut records: Vec<SourceRecord> = Vec::new();
    let mut selected = 0usize;
    let mut failed = 0usize;
    for (source, outcome) in [
        (google.source(), google_outcome),
        (openlib.source(), openlib_outcome),
    ] {
        match outcome {
            None => {}
            Some(Ok(provider_records)) => {
                selected += 1;
                tracing::debug!(%source, count = provider_records.len(), "provider returned records");
                records.extend(provider_records);
            }
            Some(Err(err)) => {
                selected += 1;
                failed += 1;
                tracing::warn!(%source, error = %err, "provider query failed");
            }
        }
    }

    // 3. Normalize and fuse.
    let page = fuse(normalize_all(records), query.offset, query.limit);

    // 4. A transient outage must not be cached as an empty answer.
    if selected > 0 && failed == selected {
        tracing::debug!("every selected provider failed; not caching");
    } else {
        cache.insert(key, page.clone()).await;
    }

    Ok(page)
}

/// Query one provider if the filter selects it. `None` means skipped.
async fn fetch_if_selected<P: BookProvider>(
    provider: &P,
    filter: SourceFilter,
    request: &ProviderRequest,
    time_box: Duration,
) -> Option<Result<Vec<SourceRecord>, SearchError>> {
    let source = provider.source();
    if !filter.includes(source) {
        return None;
    }
    Some(fetch_with_timeout(provider, source, request, time_box).await)
}

async fn fetch_with_timeout<P: BookProvider>(
    provider: &P,
    source: Source,
    request: &ProviderRequest,
    time_box: Duration,
) -> Result<Vec<SourceRecord>, SearchError> {
    match tokio::time::timeout(time_box, provider.fetch(request)).await {
        Ok(result) => result,
        Err(_) => Err(SearchError::Timeout(format!(
            "{source} did not answer within {}s",
            time_box.as_secs()
        ))),
    }
}
