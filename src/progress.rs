//! Ingestion progress reporting.
//!
//! Reports observable progress while the corpus is fetched and indexed so
//! users see how much is left and which records were dropped. Progress is
//! emitted on stderr so stdout remains parseable for scripts. Display
//! only: the ingest report, not these events, is the source of truth.

use std::io::Write;

/// A single progress event from the ingestion pipeline.
#[derive(Clone, Debug)]
pub enum IngestEvent {
    /// The manifest has been resolved; fetching is about to start.
    Fetching { total: usize },
    /// Running tally of processed records (succeeded + skipped).
    Ingested { done: usize, total: usize },
    /// A record was skipped; carries the reason for the log.
    Skipped { locator: String, reason: String },
}

/// Reports ingestion progress. Implementations write to stderr.
pub trait IngestProgressReporter: Send + Sync {
    fn report(&self, event: IngestEvent);
}

/// Human-friendly progress: "ingest  142 / 371 records".
pub struct StderrProgress;

impl IngestProgressReporter for StderrProgress {
    fn report(&self, event: IngestEvent) {
        let line = match &event {
            IngestEvent::Fetching { total } => {
                format!("ingest  fetching {} records...\n", total)
            }
            IngestEvent::Ingested { done, total } => {
                format!("ingest  {} / {} records\n", done, total)
            }
            IngestEvent::Skipped { locator, reason } => {
                format!("ingest  skipped {}: {}\n", locator, reason)
            }
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl IngestProgressReporter for JsonProgress {
    fn report(&self, event: IngestEvent) {
        let obj = match &event {
            IngestEvent::Fetching { total } => serde_json::json!({
                "event": "progress",
                "phase": "fetching",
                "total": total
            }),
            IngestEvent::Ingested { done, total } => serde_json::json!({
                "event": "progress",
                "phase": "ingesting",
                "done": done,
                "total": total
            }),
            IngestEvent::Skipped { locator, reason } => serde_json::json!({
                "event": "skipped",
                "locator": locator,
                "reason": reason
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl IngestProgressReporter for NoProgress {
    fn report(&self, _event: IngestEvent) {}
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn IngestProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
