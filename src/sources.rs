//! Record sources: where the manifest and raw records come from.
//!
//! The ingestion pipeline is written against the [`RecordSource`] trait.
//! [`HttpSource`] is the production implementation (manifest plus one JSON
//! document per locator, fetched over HTTP with a single attempt each);
//! [`StaticSource`] serves fixed records from memory for tests and
//! fixtures.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use crate::config::Config;
use crate::models::RawRecord;

/// Supplies the manifest and individual raw records to the index builder.
///
/// Implementations must be `Send + Sync`; fetches for different locators
/// may run concurrently.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// The ordered list of record locators to ingest.
    async fn fetch_manifest(&self) -> Result<Vec<String>>;

    /// Fetch one raw record. A failure here makes the builder skip the
    /// record for the rest of the session; it is never retried.
    async fn fetch_record(&self, locator: &str) -> Result<RawRecord>;
}

/// HTTP-backed source: a JSON manifest (array of filenames) and one JSON
/// record per locator under a common base URL.
pub struct HttpSource {
    client: reqwest::Client,
    manifest_url: String,
    record_base_url: String,
}

impl HttpSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            manifest_url: config.manifest.url.clone(),
            record_base_url: config.manifest.record_base_url.clone(),
        })
    }

    fn record_url(&self, locator: &str) -> String {
        if self.record_base_url.ends_with('/') {
            format!("{}{}", self.record_base_url, locator)
        } else {
            format!("{}/{}", self.record_base_url, locator)
        }
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch_manifest(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.manifest_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to fetch manifest from {}", self.manifest_url))?;

        response
            .json::<Vec<String>>()
            .await
            .context("Manifest is not a JSON array of filenames")
    }

    async fn fetch_record(&self, locator: &str) -> Result<RawRecord> {
        let url = self.record_url(locator);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to fetch record from {}", url))?;

        response
            .json::<RawRecord>()
            .await
            .with_context(|| format!("Record at {} is not valid JSON", url))
    }
}

/// Fixed in-memory source for tests and offline fixtures.
///
/// Locators keep their insertion order in the manifest. A locator pushed
/// with [`push_missing`](StaticSource::push_missing) appears in the
/// manifest but fails to fetch, simulating a broken record.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    manifest: Vec<String>,
    records: HashMap<String, RawRecord>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, locator: &str, record: RawRecord) {
        self.manifest.push(locator.to_string());
        self.records.insert(locator.to_string(), record);
    }

    pub fn push_missing(&mut self, locator: &str) {
        self.manifest.push(locator.to_string());
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_manifest(&self) -> Result<Vec<String>> {
        Ok(self.manifest.clone())
    }

    async fn fetch_record(&self, locator: &str) -> Result<RawRecord> {
        self.records
            .get(locator)
            .cloned()
            .ok_or_else(|| anyhow!("No record available for '{}'", locator))
    }
}

/// Probe the manifest endpoint and print its status.
///
/// Used by the `status` CLI command to verify configuration before a full
/// ingest. An unreachable manifest is reported, not fatal.
pub async fn run_status(config: &Config) -> Result<()> {
    let source = HttpSource::from_config(config)?;

    println!("{:<10} {}", "manifest", config.manifest.url);
    println!("{:<10} {}", "records", config.manifest.record_base_url);
    match source.fetch_manifest().await {
        Ok(locators) => println!("{:<10} OK ({} locators)", "status", locators.len()),
        Err(err) => println!("{:<10} UNREACHABLE ({:#})", "status", err),
    }

    Ok(())
}
