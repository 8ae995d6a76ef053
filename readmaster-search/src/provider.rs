//! Trait definition for pluggable catalog providers.
//!
//! Each catalog (Google Books, Open Library) is reached through a
//! [`BookProvider`] that hands back raw [`SourceRecord`]s. Transport,
//! authentication and pagination against the upstream API belong to the
//! implementor; the combined search only sees records or an error.

use crate::error::SearchError;
use crate::query::EffectiveQuery;
use crate::sources::SourceRecord;
use crate::types::Source;

/// What a provider is asked for on one combined search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    /// Trimmed query text, case preserved.
    pub query: String,
    /// Lowercased two-letter language code, if the caller restricted it.
    pub language: Option<String>,
    /// How many records to fetch at most. Covers `offset + limit` so the
    /// requested page can be filled after merging.
    pub max_records: usize,
}

impl ProviderRequest {
    /// Derive the provider request for a validated query.
    pub fn for_query(query: &EffectiveQuery) -> Self {
        Self {
            query: query.query.clone(),
            language: query.language.clone(),
            max_records: query.window_end(),
        }
    }
}

/// A pluggable catalog backend.
///
/// All implementations must be `Send + Sync` so both providers can be
/// queried concurrently.
pub trait BookProvider: Send + Sync {
    /// Fetch raw records for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the upstream call fails or its payload
    /// cannot be decoded. The combined search treats any error as zero
    /// records from this provider.
    fn fetch(
        &self,
        request: &ProviderRequest,
    ) -> impl std::future::Future<Output = Result<Vec<SourceRecord>, SearchError>> + Send;

    /// Which [`Source`] this provider represents.
    fn source(&self) -> Source;
}
