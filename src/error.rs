//! Error types for the readmaster host.

use readmaster_search::SearchError;

/// Top-level error type for the search host.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Combined search rejected the request.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// A provider fixture file is missing or malformed.
    #[error("fixture error: {0}")]
    Fixture(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = AppError::Config("bad toml".into());
        assert_eq!(err.to_string(), "config error: bad toml");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn search_error_converts() {
        let err: AppError = SearchError::InvalidQuery("q must be at least 1 characters".into()).into();
        assert_eq!(
            err.to_string(),
            "search error: invalid query: q must be at least 1 characters"
        );
    }

    #[test]
    fn app_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppError>();
    }
}
