//! File-backed catalog providers.
//!
//! Each file holds one provider payload exactly as the fetch layer would
//! hand it over: a JSON array of raw records, or the provider's envelope
//! (`{"items": [...]}` for Google Books, `{"docs": [...]}` for Open Library).
//! The file is read on every fetch so edits show up without a restart.

use std::path::{Path, PathBuf};

use readmaster_search::{
    BookProvider, ProviderRequest, SearchError, Source, SourceRecord, parse_records,
};

use crate::error::{AppError, Result};

/// A [`BookProvider`] that serves records from a JSON file.
///
/// With no file configured it answers every request with zero records.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    source: Source,
    path: Option<PathBuf>,
}

impl JsonFileProvider {
    /// Serve `source` records from `path`.
    pub fn new(source: Source, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: Some(path.into()),
        }
    }

    /// A provider with no backing file.
    pub fn empty(source: Source) -> Self {
        Self { source, path: None }
    }

    /// Build from an optional path, as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fixture`] if a path is given but does not name a
    /// regular file. A file that disappears later is a provider failure
    /// at fetch time instead.
    pub fn open(source: Source, path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) if !path.is_file() => Err(AppError::Fixture(format!(
                "{source} fixture {} is not a file",
                path.display()
            ))),
            path => Ok(Self { source, path }),
        }
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl BookProvider for JsonFileProvider {
    async fn fetch(
        &self,
        request: &ProviderRequest,
    ) -> std::result::Result<Vec<SourceRecord>, SearchError> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        let payload = tokio::fs::read_to_string(path).await.map_err(|e| {
            SearchError::Provider(format!("{}: cannot read {}: {e}", self.source, path.display()))
        })?;
        let mut records = parse_records(self.source, &payload)?;
        // Upstream APIs cap the page size; mirror that so offsets behave the same.
        records.truncate(request.max_records);
        tracing::debug!(source = %self.source, path = %path.display(), count = records.len(), "loaded fixture records");
        Ok(records)
    }

    fn source(&self) -> Source {
        self.source
    }
}
