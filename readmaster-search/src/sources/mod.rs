//! Source normalizers.
//!
//! Each provider module defines the raw record shape its fetch collaborator
//! hands over and a total function mapping it into a [`SearchResultItem`].
//! Malformed optional fields degrade to "absent" during decoding; a record
//! is never rejected because of an optional field.

pub mod google;
pub mod openlibrary;

pub use google::{normalize_google, GoogleImageLinks, GoogleVolume};
pub use openlibrary::{normalize_openlibrary, OpenLibraryDoc};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SearchError;
use crate::types::{SearchResultItem, Source};

/// Title used when a source record carries no usable title.
pub const UNTITLED: &str = "Untitled";

/// One raw record from either provider.
#[derive(Debug, Clone)]
pub enum SourceRecord {
    Google(GoogleVolume),
    OpenLibrary(OpenLibraryDoc),
}

impl SourceRecord {
    /// Which provider this record came from.
    pub fn source(&self) -> Source {
        match self {
            Self::Google(_) => Source::Google,
            Self::OpenLibrary(_) => Source::OpenLibrary,
        }
    }

    /// Map this record into the canonical item shape. Never fails.
    pub fn normalize(self) -> SearchResultItem {
        match self {
            Self::Google(volume) => normalize_google(volume),
            Self::OpenLibrary(doc) => normalize_openlibrary(doc),
        }
    }
}

impl From<GoogleVolume> for SourceRecord {
    fn from(volume: GoogleVolume) -> Self {
        Self::Google(volume)
    }
}

impl From<OpenLibraryDoc> for SourceRecord {
    fn from(doc: OpenLibraryDoc) -> Self {
        Self::OpenLibrary(doc)
    }
}

/// Decode a provider payload into raw records.
///
/// Accepts a bare JSON array of records, or the provider's envelope
/// object (`{"items": [...]}` for Google, `{"docs": [...]}` for Open
/// Library). Individual records that cannot be decoded (for example a
/// missing id) are skipped and logged; they do not fail the batch.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the payload is not JSON or contains
/// no record array at all.
pub fn parse_records(source: Source, payload: &str) -> Result<Vec<SourceRecord>, SearchError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| SearchError::Parse(format!("{source} payload is not valid JSON: {e}")))?;
    decode_records(source, value)
}

/// Decode an already-parsed provider payload. See [`parse_records`].
pub fn decode_records(source: Source, value: Value) -> Result<Vec<SourceRecord>, SearchError> {
    let envelope_key = match source {
        Source::Google => "items",
        Source::OpenLibrary => "docs",
    };
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove(envelope_key) {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(SearchError::Parse(format!(
                    "{source} payload field {envelope_key:?} is not an array"
                )))
            }
        },
        _ => {
            return Err(SearchError::Parse(format!(
                "{source} payload must be an array or an object with {envelope_key:?}"
            )))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let decoded = match source {
            Source::Google => serde_json::from_value::<GoogleVolume>(entry).map(SourceRecord::from),
            Source::OpenLibrary => {
                serde_json::from_value::<OpenLibraryDoc>(entry).map(SourceRecord::from)
            }
        };
        match decoded {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(%source, position, error = %err, "skipping undecodable record");
            }
        }
    }
    Ok(records)
}

/// Extract the leading 4-digit year from a free-form date string.
///
/// `"2019-09-13"` and `"2019"` yield 2019. Anything that does not start
/// with four ASCII digits (`"c1999"`, `"June 1999"`, `"19"`) yields `None`.
pub fn publish_year(date: &str) -> Option<u32> {
    let prefix = date.trim().get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Trim an optional string and treat blank values as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Collapse an array-valued field to its first element; empty → absent.
pub(crate) fn first_of(values: Vec<String>) -> Option<String> {
    non_blank(values.into_iter().next())
}

/// The first list unless it is empty, then the second.
pub(crate) fn non_empty_or<T>(primary: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}

/// Keep a rating only if it lies in `[0, 5]`.
pub(crate) fn rating(value: Option<f64>) -> Option<f64> {
    value.filter(|r| r.is_finite() && (0.0..=5.0).contains(r))
}

/// Only a literal `true` is materialized.
pub(crate) fn only_true(value: Option<bool>) -> Option<bool> {
    value.filter(|v| *v)
}

/// Deserialize an optional field, turning a type mismatch into `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserialize a list field element by element, dropping elements that do
/// not decode and treating a non-array as empty.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// Deserialize a list of names. A non-string entry becomes `""` so the
/// list keeps its length; a non-array is an empty list.
pub(crate) fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Value::String(name) => name,
            _ => String::new(),
        })
        .collect())
}
