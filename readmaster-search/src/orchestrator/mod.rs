//! Fusion pipeline: dedup keys, merge, scoring, ranking and the combined
//! search that drives them.
//!
//! Everything below [`search`] is pure and synchronous. [`search`] fans
//! out to the providers, then hands the normalized records to [`search::fuse`].

pub mod dedup;
pub mod dedup_key;
pub mod ranking;
pub mod scoring;
pub mod search;
