//! Ingestion pipeline orchestration.
//!
//! Fetches raw records concurrently from a [`RecordSource`], then runs
//! classify → store → index for each as one atomic unit: a document is
//! either fully absent from the catalog or fully present-and-indexed.
//! Individual fetch or parse failures skip the record (counted in the
//! report) and never abort the run.

use std::sync::Arc;

use anyhow::{bail, Result};
use sha2::{Digest, Sha256};
use tokio::task::JoinSet;

use crate::catalog::Catalog;
use crate::classify::classify;
use crate::models::{Document, IngestReport, RawRecord};
use crate::progress::{IngestEvent, IngestProgressReporter};
use crate::sources::RecordSource;

/// Ingest the given locators into the catalog.
///
/// Fetches run `concurrency` at a time, one independent request per
/// locator, no retries. Records are then processed in manifest order, so
/// progress output and duplicate-identifier resolution are deterministic.
/// Returns the attempted/succeeded/skipped counts.
pub async fn ingest(
    catalog: &mut Catalog,
    source: Arc<dyn RecordSource>,
    locators: &[String],
    concurrency: usize,
    progress: &dyn IngestProgressReporter,
) -> Result<IngestReport> {
    let mut report = IngestReport {
        attempted: locators.len(),
        ..Default::default()
    };
    let concurrency = concurrency.max(1);

    progress.report(IngestEvent::Fetching {
        total: locators.len(),
    });

    for batch in locators.chunks(concurrency) {
        let mut tasks = JoinSet::new();
        for (position, locator) in batch.iter().enumerate() {
            let source = Arc::clone(&source);
            let locator = locator.clone();
            tasks.spawn(async move {
                let fetched = source.fetch_record(&locator).await;
                (position, locator, fetched)
            });
        }

        let mut fetched: Vec<(usize, String, Result<RawRecord>)> =
            Vec::with_capacity(batch.len());
        while let Some(joined) = tasks.join_next().await {
            fetched.push(joined?);
        }
        // Tasks complete in arbitrary order; restore manifest order.
        fetched.sort_by_key(|(position, _, _)| *position);

        for (_, locator, outcome) in fetched {
            match outcome.and_then(|raw| build_document(&locator, raw)) {
                Ok(doc) => {
                    catalog.insert(doc);
                    report.succeeded += 1;
                }
                Err(err) => {
                    report.skipped += 1;
                    progress.report(IngestEvent::Skipped {
                        locator,
                        reason: format!("{:#}", err),
                    });
                }
            }
            progress.report(IngestEvent::Ingested {
                done: report.succeeded + report.skipped,
                total: report.attempted,
            });
        }
    }

    Ok(report)
}

/// Normalize a raw record into a document.
///
/// The identifier is the record's own `_id` when present, else the
/// locator; the filename falls back to the locator and the remaining
/// fields to empty strings.
fn build_document(locator: &str, raw: RawRecord) -> Result<Document> {
    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| locator.to_string());
    if id.is_empty() {
        bail!("Record has neither an identifier nor a locator");
    }

    let filename = raw
        .archivo
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| locator.to_string());
    let text = raw.texto.unwrap_or_default();
    let pdf_url = raw.pdf_url.unwrap_or_default();
    let doc_type = classify(&filename, &text);

    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    hasher.update(filename.as_bytes());
    hasher.update(text.as_bytes());
    let dedup_hash = format!("{:x}", hasher.finalize());

    Ok(Document {
        id,
        filename,
        text,
        pdf_url,
        doc_type,
        dedup_hash,
        ingested_at: chrono::Utc::now(),
    })
}
