//! # Normateca CLI
//!
//! Command-line interface for the in-memory legal-document search engine.
//! There is no persistence by design, so every command that reads the
//! corpus (`search`, `get`, `repl`) rebuilds it from the manifest first.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `normateca ingest` | Fetch the manifest, build the corpus, print the report |
//! | `normateca search "<query>"` | One-shot search with optional type filter |
//! | `normateca get <id>` | Print a full document by identifier |
//! | `normateca repl` | Interactive search loop |
//! | `normateca status` | Probe the manifest endpoint |
//!
//! ## Examples
//!
//! ```bash
//! normateca --config ./config/normateca.toml ingest
//! normateca search "decreto 123" --types decreto,resolucion
//! normateca search "tutela" --limit 10
//! normateca repl
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use normateca::catalog::Catalog;
use normateca::config::{self, Config};
use normateca::ingest;
use normateca::models::IngestReport;
use normateca::progress::{IngestProgressReporter, ProgressMode};
use normateca::query::{execute_query, QueryParams, TypeFilter};
use normateca::repl;
use normateca::sources::{self, HttpSource, RecordSource};

/// Normateca — search a corpus of Spanish legal documents by content and
/// type, rebuilt in memory from a remote manifest on every run.
#[derive(Parser)]
#[command(
    name = "normateca",
    about = "Normateca — in-memory indexing and retrieval for Spanish legal documents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/normateca.toml")]
    config: PathBuf,

    /// Progress reporting on stderr: off, human, or json.
    /// Defaults to human when stderr is a TTY.
    #[arg(long, global = true)]
    progress: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch the manifest and build the in-memory corpus.
    ///
    /// Prints the ingestion report (attempted / succeeded / skipped).
    /// Failed records are skipped with a warning, never fatal.
    Ingest {
        /// Maximum number of records to ingest.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search the corpus.
    ///
    /// Rebuilds the corpus first (nothing persists between runs), then
    /// runs one query and prints ranked results.
    Search {
        /// The search query (at least two characters after trimming).
        query: String,

        /// Comma-separated type labels to keep
        /// (resolucion, decreto, ley, tutela, unclassified).
        /// Omitted or empty means all types.
        #[arg(long)]
        types: Option<String>,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print a document by identifier.
    Get {
        /// Document identifier (upstream `_id` or record locator).
        id: String,
    },

    /// Interactive search loop.
    ///
    /// Asks for credentials when a `[users]` table is configured.
    Repl,

    /// Check that the manifest endpoint is reachable.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    let mode = match cli.progress.as_deref() {
        None => ProgressMode::default_for_tty(),
        Some("off") => ProgressMode::Off,
        Some("human") => ProgressMode::Human,
        Some("json") => ProgressMode::Json,
        Some(other) => bail!(
            "Unknown progress mode: '{}'. Use off, human, or json.",
            other
        ),
    };
    let reporter = mode.reporter();

    match cli.command {
        Commands::Ingest { limit } => {
            let (catalog, report) = build_corpus(&cfg, limit, reporter.as_ref()).await?;
            println!("ingest");
            println!("  attempted: {}", report.attempted);
            println!("  succeeded: {}", report.succeeded);
            println!("  skipped: {}", report.skipped);
            println!("  documents in store: {}", catalog.store().len());
        }
        Commands::Search {
            query,
            types,
            limit,
        } => {
            let (catalog, _) = build_corpus(&cfg, None, reporter.as_ref()).await?;
            let filter = match types {
                Some(spec) => repl::parse_type_filter(&spec)?,
                None => TypeFilter::all(),
            };
            let mut params = query_params(&cfg);
            if let Some(limit) = limit {
                params.result_limit = limit;
            }
            let outcome = execute_query(&catalog, &query, &filter, &params);
            repl::print_outcome(&outcome, &params);
        }
        Commands::Get { id } => {
            let (catalog, _) = build_corpus(&cfg, None, reporter.as_ref()).await?;
            match catalog.store().get(&id) {
                Some(doc) => {
                    println!("id: {}", doc.id);
                    println!("type: {}", doc.doc_type);
                    println!("filename: {}", doc.filename);
                    if !doc.pdf_url.is_empty() {
                        println!("pdf: {}", doc.pdf_url);
                    }
                    println!("ingested: {}", doc.ingested_at.format("%Y-%m-%dT%H:%M:%SZ"));
                    println!();
                    println!("{}", doc.text);
                }
                None => println!("No document with id '{}'.", id),
            }
        }
        Commands::Repl => {
            let (catalog, _) = build_corpus(&cfg, None, reporter.as_ref()).await?;
            repl::run_repl(&cfg, &catalog)?;
        }
        Commands::Status => {
            sources::run_status(&cfg).await?;
        }
    }

    Ok(())
}

/// Fetch the manifest and ingest it into a fresh catalog.
async fn build_corpus(
    cfg: &Config,
    limit: Option<usize>,
    progress: &dyn IngestProgressReporter,
) -> Result<(Catalog, IngestReport)> {
    let source: Arc<dyn RecordSource> = Arc::new(HttpSource::from_config(cfg)?);
    let mut locators = source.fetch_manifest().await?;
    if let Some(limit) = limit {
        locators.truncate(limit);
    }

    let mut catalog = Catalog::new();
    let report = ingest::ingest(
        &mut catalog,
        source,
        &locators,
        cfg.fetch.concurrency,
        progress,
    )
    .await?;

    Ok((catalog, report))
}

fn query_params(cfg: &Config) -> QueryParams {
    QueryParams {
        result_limit: cfg.retrieval.result_limit,
        min_query_chars: cfg.retrieval.min_query_chars,
    }
}
