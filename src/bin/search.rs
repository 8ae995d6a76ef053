//! Command-line front end for the combined book search.
//!
//! Reads raw provider payloads from files, runs them through the fusion
//! pipeline and prints the result page as JSON on stdout. All tracing
//! output goes to stderr so stdout stays machine-readable.

use std::path::PathBuf;

use clap::Parser;
use readmaster::{AppConfig, JsonFileProvider};
use readmaster_search::{CombinedSearch, SearchParams, Source, SourceFilter};
use tracing_subscriber::EnvFilter;

/// Search Google Books and Open Library payloads as one ranked list.
#[derive(Parser)]
#[command(name = "readmaster-search", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default configuration file and exit.
    #[arg(long)]
    init_config: bool,

    /// Google Books payload (JSON array or `{"items": [...]}`).
    #[arg(long, value_name = "FILE")]
    google: Option<PathBuf>,

    /// Open Library payload (JSON array or `{"docs": [...]}`).
    #[arg(long, value_name = "FILE")]
    openlib: Option<PathBuf>,

    /// Page size.
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of ranked results to skip.
    #[arg(long)]
    offset: Option<usize>,

    /// Two-letter language code.
    #[arg(long)]
    language: Option<String>,

    /// Which providers to query: all, google or openlib.
    #[arg(long, default_value = "all")]
    source: SourceFilter,

    /// Search terms.
    #[arg(required_unless_present = "init_config")]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);

    if cli.init_config {
        AppConfig::default().save_to_file(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    // An explicit --config must exist; the default location is optional.
    let config = if cli.config.is_some() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::load_or_default(&config_path)?
    };

    // Initialise tracing to stderr only (stdout carries the JSON result).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .init();

    let search = CombinedSearch::new(
        JsonFileProvider::open(Source::Google, cli.google)?,
        JsonFileProvider::open(Source::OpenLibrary, cli.openlib)?,
        config.search,
    )?;

    let params = SearchParams {
        q: cli.query.join(" "),
        limit: cli.limit,
        offset: cli.offset,
        language: cli.language,
        source: Some(cli.source),
    };

    let page = search.search(&params).await.map_err(|e| {
        tracing::error!(error = %e, "search failed");
        anyhow::anyhow!("readmaster-search failed: {e}")
    })?;
    tracing::info!(count = page.len(), "search complete");

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
