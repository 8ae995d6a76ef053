//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] carries the boundary values the combined search relies
//! on: page sizes, query-length bounds, provider time boxes and the cache
//! TTL. It is passed explicitly into every entry point; nothing here is a
//! process-wide global.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for a combined book search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size used when the caller does not supply `limit`.
    pub default_limit: usize,
    /// Largest `limit` a caller may request.
    pub max_limit: usize,
    /// Minimum query length in characters, after trimming.
    pub min_query_length: usize,
    /// Maximum query length in characters, after trimming.
    pub max_query_length: usize,
    /// How long a combined-search page stays cached, in seconds.
    /// Set to 0 to disable caching.
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached result pages.
    pub cache_max_entries: u64,
    /// Per-provider time box in seconds. A provider that exceeds it
    /// contributes zero records.
    pub provider_timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 40,
            min_query_length: 1,
            max_query_length: 200,
            cache_ttl_seconds: 300,
            cache_max_entries: 1000,
            provider_timeout_seconds: 8,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_limit` and `default_limit` must be greater than 0
    /// - `default_limit` must be <= `max_limit`
    /// - `min_query_length` must be greater than 0 and <= `max_query_length`
    /// - `provider_timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_limit == 0 {
            return Err(SearchError::Config(
                "max_limit must be greater than 0".into(),
            ));
        }
        if self.default_limit == 0 {
            return Err(SearchError::Config(
                "default_limit must be greater than 0".into(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(SearchError::Config(
                "default_limit must be <= max_limit".into(),
            ));
        }
        if self.min_query_length == 0 {
            return Err(SearchError::Config(
                "min_query_length must be greater than 0".into(),
            ));
        }
        if self.min_query_length > self.max_query_length {
            return Err(SearchError::Config(
                "min_query_length must be <= max_query_length".into(),
            ));
        }
        if self.provider_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "provider_timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 40);
        assert_eq!(config.min_query_length, 1);
        assert_eq!(config.max_query_length, 200);
        assert_eq!(config.cache_ttl_seconds, 300);
        assert_eq!(config.provider_timeout_seconds, 8);
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_limit_rejected() {
        let config = SearchConfig {
            max_limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_limit"));
    }

    #[test]
    fn zero_default_limit_rejected() {
        let config = SearchConfig {
            default_limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_limit"));
    }

    #[test]
    fn default_limit_above_max_rejected() {
        let config = SearchConfig {
            default_limit: 50,
            max_limit: 40,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_limit must be <= max_limit"));
    }

    #[test]
    fn zero_min_query_length_rejected() {
        let config = SearchConfig {
            min_query_length: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_query_length"));
    }

    #[test]
    fn inverted_query_length_range_rejected() {
        let config = SearchConfig {
            min_query_length: 10,
            max_query_length: 5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_query_length"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            provider_timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider_timeout_seconds"));
    }

    #[test]
    fn zero_cache_ttl_is_valid() {
        let config = SearchConfig {
            cache_ttl_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_equal_to_max_is_valid() {
        let config = SearchConfig {
            default_limit: 40,
            max_limit: 40,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"max_limit": 60}"#).expect("deserialize");
        assert_eq!(config.max_limit, 60);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.cache_ttl_seconds, 300);
    }
}
