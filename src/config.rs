use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Demo credential table for the REPL gate. Empty means no login.
    #[serde(default)]
    pub users: HashMap<String, UserConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ManifestConfig {
    /// URL of the JSON manifest (array of record filenames).
    pub url: String,
    /// Base URL the record filenames are resolved against.
    pub record_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_concurrency() -> usize {
    8
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

fn default_result_limit() -> usize {
    30
}
fn default_min_query_chars() -> usize {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct UserConfig {
    /// Plain text. This is a demo gate, not real security.
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.manifest.url.trim().is_empty() {
        anyhow::bail!("manifest.url must not be empty");
    }
    if config.manifest.record_base_url.trim().is_empty() {
        anyhow::bail!("manifest.record_base_url must not be empty");
    }
    if config.fetch.concurrency == 0 {
        anyhow::bail!("fetch.concurrency must be >= 1");
    }
    if config.fetch.timeout_secs == 0 {
        anyhow::bail!("fetch.timeout_secs must be >= 1");
    }
    if config.retrieval.result_limit == 0 {
        anyhow::bail!("retrieval.result_limit must be >= 1");
    }
    if config.retrieval.min_query_chars == 0 {
        anyhow::bail!("retrieval.min_query_chars must be >= 1");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let file = write_config(
            r#"
[manifest]
url = "https://example.com/data/manifest.json"
record_base_url = "https://example.com/data/json/"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.fetch.concurrency, 8);
        assert_eq!(config.retrieval.result_limit, 30);
        assert_eq!(config.retrieval.min_query_chars, 2);
        assert!(config.users.is_empty());
    }

    #[test]
    fn users_parse_with_default_role() {
        let file = write_config(
            r#"
[manifest]
url = "https://example.com/manifest.json"
record_base_url = "https://example.com/json/"

[users.admin]
password = "admin123"
role = "admin"

[users.usuario1]
password = "clave123"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.users["admin"].role, "admin");
        assert_eq!(config.users["usuario1"].role, "user");
    }

    #[test]
    fn zero_result_limit_is_rejected() {
        let file = write_config(
            r#"
[manifest]
url = "https://example.com/manifest.json"
record_base_url = "https://example.com/json/"

[retrieval]
result_limit = 0
"#,
        );
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn empty_manifest_url_is_rejected() {
        let file = write_config(
            r#"
[manifest]
url = ""
record_base_url = "https://example.com/json/"
"#,
        );
        assert!(load_config(file.path()).is_err());
    }
}
