//! Core data models used throughout Normateca.
//!
//! These types represent the raw records, documents, and reports that flow
//! through the ingestion and retrieval pipeline.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw record as fetched from the document collection, before normalization.
///
/// Field names follow the upstream JSON corpus (`archivo`, `texto`,
/// `pdf_url`). Every field is optional on the wire; missing values degrade
/// to empty strings (or a locator-derived identifier) during ingestion
/// rather than failing the record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRecord {
    /// Upstream identifier. Falls back to the record locator when absent.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Source filename of the original artifact.
    #[serde(default)]
    pub archivo: Option<String>,
    /// Full extracted text body.
    #[serde(default)]
    pub texto: Option<String>,
    /// Link to the original PDF.
    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// Normalized document held in the in-memory catalog.
///
/// Created once during ingestion and immutable thereafter. Nothing persists
/// across runs; the catalog is rebuilt from the manifest on every invocation.
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique identifier, stable across reloads of the same corpus.
    pub id: String,
    /// Source filename.
    pub filename: String,
    /// Full text body.
    pub text: String,
    /// Link to the original PDF (empty when unavailable).
    pub pdf_url: String,
    /// Type label assigned by the classifier at ingestion time.
    pub doc_type: DocType,
    /// SHA-256 over identity and content, for spotting unchanged records
    /// on re-ingestion.
    pub dedup_hash: String,
    /// When this document entered the catalog.
    pub ingested_at: DateTime<Utc>,
}

/// Closed set of document-type labels.
///
/// Assigned exactly once, at ingestion time, by
/// [`classify`](crate::classify::classify); never recomputed. Unrecognized
/// content degrades to `Unclassified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    Resolucion,
    Decreto,
    Ley,
    Tutela,
    Unclassified,
}

impl DocType {
    /// Every label, in classifier precedence order.
    pub const ALL: [DocType; 5] = [
        DocType::Tutela,
        DocType::Decreto,
        DocType::Resolucion,
        DocType::Ley,
        DocType::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Resolucion => "resolucion",
            DocType::Decreto => "decreto",
            DocType::Ley => "ley",
            DocType::Tutela => "tutela",
            DocType::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resolucion" | "resolución" => Ok(DocType::Resolucion),
            "decreto" => Ok(DocType::Decreto),
            "ley" => Ok(DocType::Ley),
            "tutela" => Ok(DocType::Tutela),
            "unclassified" => Ok(DocType::Unclassified),
            other => bail!(
                "Unknown document type: '{}'. Use resolucion, decreto, ley, tutela, or unclassified.",
                other
            ),
        }
    }
}

/// Counts from one ingestion run, for progress display.
///
/// `attempted == succeeded + skipped` once ingestion returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records listed by the manifest (after any `--limit`).
    pub attempted: usize,
    /// Records now present in the store and index.
    pub succeeded: usize,
    /// Records dropped due to fetch or parse failures.
    pub skipped: usize,
}
