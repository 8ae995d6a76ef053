//! # readmaster-search
//!
//! Combined book search for Read Master.
//!
//! Two catalog providers (Google Books and Open Library) describe the same
//! books in different shapes. This crate fuses their answers into one
//! deduplicated, ranked list of [`SearchResultItem`]s.
//!
//! ## Design
//!
//! - Per-source normalizers map raw records into one canonical shape
//! - Records for the same book collapse by ISBN, or by title and first author
//! - The most complete record of each group survives intact
//! - Results with a cover come first, then by completeness score
//! - Both providers are queried concurrently; one failing never fails the search
//! - Result pages are cached in memory, keyed by the effective query
//!
//! ## Security
//!
//! - No network listeners; transport belongs to the [`BookProvider`] implementor
//! - Search queries are logged only at trace level

pub mod cache;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod provider;
pub mod query;
pub mod sources;
pub mod types;

pub use cache::{build_combined_search_cache_key, ResultCache};
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::search::fuse;
pub use provider::{BookProvider, ProviderRequest};
pub use query::{EffectiveQuery, SearchParams};
pub use sources::{parse_records, SourceRecord};
pub use types::{SearchResultItem, Source, SourceFilter};

/// Search both catalogs and return one fused result page.
///
/// Validates `config` and `params`, serves the page from `cache` when the
/// same effective query was answered recently, and otherwise queries the
/// providers selected by `params.source` concurrently.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, or
/// [`SearchError::InvalidQuery`] if `params` are. Provider failures are
/// logged and absorbed: if both providers fail the page is simply empty.
///
/// # Examples
///
/// ```no_run
/// # use readmaster_search::{BookProvider, ResultCache, SearchConfig, SearchParams};
/// # async fn example(google: impl BookProvider, openlib: impl BookProvider) -> readmaster_search::Result<()> {
/// let config = SearchConfig::default();
/// let cache = ResultCache::with_config(&config);
/// let page = readmaster_search::combined_search(
///     &SearchParams::new("clean code"),
///     &google,
///     &openlib,
///     &cache,
///     &config,
/// )
/// .await?;
/// for item in &page {
///     println!("{}: {}", item.id(), item.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn combined_search<G, O>(
    params: &SearchParams,
    google: &G,
    openlib: &O,
    cache: &ResultCache,
    config: &SearchConfig,
) -> Result<Vec<SearchResultItem>>
where
    G: BookProvider,
    O: BookProvider,
{
    config.validate()?;
    orchestrator::search::orchestrate_search(params, google, openlib, cache, config).await
}

/// A combined search bound to its providers, cache and configuration.
///
/// Construct once and share; every call to [`CombinedSearch::search`]
/// goes through the same cache.
pub struct CombinedSearch<G, O> {
    google: G,
    openlib: O,
    cache: ResultCache,
    config: SearchConfig,
}

impl<G: BookProvider, O: BookProvider> CombinedSearch<G, O> {
    /// Bind two providers to a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn new(google: G, openlib: O, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let cache = ResultCache::with_config(&config);
        Ok(Self {
            google,
            openlib,
            cache,
            config,
        })
    }

    /// Run one combined search. See [`combined_search`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if `params` fail validation.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<SearchResultItem>> {
        orchestrator::search::orchestrate_search(
            params,
            &self.google,
            &self.openlib,
            &self.cache,
            &self.config,
        )
        .await
    }

    /// The configuration this search was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
