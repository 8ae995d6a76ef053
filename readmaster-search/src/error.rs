//! Error types for the readmaster-search crate.
//!
//! The fusion pipeline itself never fails. Errors exist only at its
//! boundary: rejected query parameters, invalid configuration, and
//! provider failures (which the combined search absorbs and logs).

/// Errors that can occur around a combined book search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Query parameters failed validation. Maps to a 4xx-class rejection.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A catalog provider returned an error.
    #[error("provider error: {0}")]
    Provider(String),

    /// A catalog provider did not answer within its time box.
    #[error("provider timed out: {0}")]
    Timeout(String),

    /// A raw provider payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for readmaster-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
