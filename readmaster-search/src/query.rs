//! Query parameters for a combined search, and their validation.
//!
//! [`SearchParams`] is what the HTTP layer hands over; [`EffectiveQuery`]
//! is the validated form with defaults applied. Rejections surface as
//! [`SearchError::InvalidQuery`] before any provider is contacted.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::SourceFilter;

/// Raw query descriptor as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Free-text query.
    pub q: String,
    /// Page size; defaults to [`SearchConfig::default_limit`].
    pub limit: Option<usize>,
    /// Number of ranked results to skip; defaults to 0.
    pub offset: Option<usize>,
    /// Two-letter language code restricting results.
    pub language: Option<String>,
    /// Which providers to query; defaults to both.
    pub source: Option<SourceFilter>,
}

impl SearchParams {
    /// Parameters for `q` with every other field left at its default.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    /// Validate against `config` and apply defaults.
    ///
    /// Checks:
    /// - `q`, once trimmed, is between `min_query_length` and
    ///   `max_query_length` characters
    /// - `limit` is between 1 and `max_limit`
    /// - `language`, if non-blank, is exactly two ASCII letters
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] naming the offending field.
    pub fn validate(&self, config: &SearchConfig) -> Result<EffectiveQuery, SearchError> {
        let query = self.q.trim();
        let length = query.chars().count();
        if length < config.min_query_length {
            return Err(SearchError::InvalidQuery(format!(
                "q must be at least {} characters",
                config.min_query_length
            )));
        }
        if length > config.max_query_length {
            return Err(SearchError::InvalidQuery(format!(
                "q must be at most {} characters",
                config.max_query_length
            )));
        }

        let limit = self.limit.unwrap_or(config.default_limit);
        if limit == 0 || limit > config.max_limit {
            return Err(SearchError::InvalidQuery(format!(
                "limit must be between 1 and {}",
                config.max_limit
            )));
        }

        let language = match self.language.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) if code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic()) => {
                Some(code.to_ascii_lowercase())
            }
            Some(_) => {
                return Err(SearchError::InvalidQuery(
                    "language must be a 2-letter code".into(),
                ))
            }
        };

        Ok(EffectiveQuery {
            query: query.to_string(),
            limit,
            offset: self.offset.unwrap_or(0),
            language,
            source: self.source.unwrap_or_default(),
        })
    }
}

/// Validated query parameters with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveQuery {
    /// Trimmed query text, case preserved for the providers.
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    /// Lowercased language code.
    pub language: Option<String>,
    pub source: SourceFilter,
}

impl EffectiveQuery {
    /// How many ranked results a page at this offset needs to exist.
    pub fn window_end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn defaults_applied() {
        let query = SearchParams::new("clean code").validate(&config()).expect("valid");
        assert_eq!(query.query, "clean code");
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset, 0);
        assert_eq!(query.language, None);
        assert_eq!(query.source, SourceFilter::All);
    }

    #[test]
    fn query_is_trimmed_but_case_kept() {
        let query = SearchParams::new("  Clean Code ").validate(&config()).expect("valid");
        assert_eq!(query.query, "Clean Code");
    }

    #[test]
    fn empty_query_rejected() {
        let err = SearchParams::new("   ").validate(&config()).unwrap_err();
        assert!(err.to_string().contains("q must be at least 1"));
    }

    #[test]
    fn query_at_max_length_accepted() {
        let q = "a".repeat(200);
        assert!(SearchParams::new(q).validate(&config()).is_ok());
    }

    #[test]
    fn query_over_max_length_rejected() {
        let q = "a".repeat(201);
        let err = SearchParams::new(q).validate(&config()).unwrap_err();
        assert!(err.to_string().contains("at most 200"));
    }

    #[test]
    fn query_length_counts_characters_not_bytes() {
        let config = SearchConfig {
            max_query_length: 3,
            ..Default::default()
        };
        assert!(SearchParams::new("ééé").validate(&config).is_ok());
    }

    #[test]
    fn custom_min_query_length_enforced() {
        let config = SearchConfig {
            min_query_length: 3,
            ..Default::default()
        };
        assert!(SearchParams::new("ab").validate(&config).is_err());
        assert!(SearchParams::new("abc").validate(&config).is_ok());
    }

    #[test]
    fn limit_bounds() {
        let ok_low = SearchParams {
            limit: Some(1),
            ..SearchParams::new("q")
        };
        assert_eq!(ok_low.validate(&config()).expect("valid").limit, 1);

        let ok_high = SearchParams {
            limit: Some(40),
            ..SearchParams::new("q")
        };
        assert_eq!(ok_high.validate(&config()).expect("valid").limit, 40);

        let zero = SearchParams {
            limit: Some(0),
            ..SearchParams::new("q")
        };
        assert!(zero.validate(&config()).is_err());

        let over = SearchParams {
            limit: Some(41),
            ..SearchParams::new("q")
        };
        let err = over.validate(&config()).unwrap_err();
        assert!(err.to_string().contains("limit must be between 1 and 40"));
    }

    #[test]
    fn language_normalised_to_lowercase() {
        let params = SearchParams {
            language: Some(" ES ".into()),
            ..SearchParams::new("q")
        };
        assert_eq!(params.validate(&config()).expect("valid").language.as_deref(), Some("es"));
    }

    #[test]
    fn blank_language_treated_as_absent() {
        let params = SearchParams {
            language: Some("  ".into()),
            ..SearchParams::new("q")
        };
        assert_eq!(params.validate(&config()).expect("valid").language, None);
    }

    #[test]
    fn invalid_language_rejected() {
        for bad in ["eng", "e", "e1", "é"] {
            let params = SearchParams {
                language: Some(bad.into()),
                ..SearchParams::new("q")
            };
            let err = params.validate(&config()).unwrap_err();
            assert!(err.to_string().contains("language"), "{bad} should be rejected");
        }
    }

    #[test]
    fn offset_and_source_carried() {
        let params = SearchParams {
            offset: Some(30),
            source: Some(SourceFilter::OpenLibrary),
            ..SearchParams::new("q")
        };
        let query = params.validate(&config()).expect("valid");
        assert_eq!(query.offset, 30);
        assert_eq!(query.source, SourceFilter::OpenLibrary);
        assert_eq!(query.window_end(), 40);
    }

    #[test]
    fn params_deserialize_from_query_shape() {
        let params: SearchParams =
            serde_json::from_str(r#"{"q": "dune", "limit": 5, "source": "openlib"}"#)
                .expect("deserialize");
        assert_eq!(params.q, "dune");
        assert_eq!(params.limit, Some(5));
        assert_eq!(params.source, Some(SourceFilter::OpenLibrary));
    }
}
