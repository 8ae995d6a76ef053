//! Read Master search host.
//!
//! Wires the `readmaster-search` pipeline to a TOML configuration file,
//! `tracing` output on stderr, and file-backed catalog providers for the
//! `readmaster-search` command-line tool.

pub mod config;
pub mod error;
pub mod fixtures;

pub use config::{AppConfig, LogConfig};
pub use error::{AppError, Result};
pub use fixtures::JsonFileProvider;
