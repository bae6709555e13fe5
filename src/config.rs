use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Base URL of the documentation site, e.g. "https://developer.android.com/reference"
    pub docs_url_base: String,

    /// Local directory the mirror is written to
    pub output_dir: String,

    /// Alternate file or URL to load the package list from.
    /// Defaults to "<docs_url_base>/package-list" when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_list_source: Option<String>,

    /// Only crawl packages whose names start with one of these prefixes
    #[serde(default)]
    pub package_filters: Vec<String>,

    /// Number of concurrent download workers
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Configuration for a transform run over an existing mirror
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Directory containing the mirrored documentation pages
    pub input_dir: String,

    /// File the serialized catalog is written to
    pub output_file: String,

    /// URL path prefix that precedes the package path in canonical links
    /// but is not part of the package name itself, e.g. "/reference/"
    pub url_package_prefix: String,

    /// Only parse packages whose names start with one of these prefixes
    #[serde(default)]
    pub package_filters: Vec<String>,
}

/// Default value for concurrency
fn default_concurrency() -> usize {
    1
}

/// Default value for request_timeout_secs
fn default_request_timeout_secs() -> u64 {
    30
}

impl ScrapeConfig {
    /// Create a new configuration with default values
    pub fn new(docs_url_base: &str, output_dir: &str) -> Self {
        Self {
            docs_url_base: docs_url_base.to_string(),
            output_dir: output_dir.to_string(),
            package_list_source: None,
            package_filters: Vec::new(),
            concurrency: default_concurrency(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// The effective package-list source: the configured one, or the
    /// conventional "<base>/package-list" next to the docs root
    pub fn package_list_source(&self) -> String {
        match &self.package_list_source {
            Some(source) => source.clone(),
            None => format!("{}/package-list", self.docs_url_base.trim_end_matches('/')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_package_list_source() {
        let config = ScrapeConfig::new("https://example.com/reference/", "out");
        assert_eq!(
            config.package_list_source(),
            "https://example.com/reference/package-list"
        );

        let mut explicit = ScrapeConfig::new("https://example.com/reference", "out");
        explicit.package_list_source = Some("pkg-list.txt".to_string());
        assert_eq!(explicit.package_list_source(), "pkg-list.txt");
    }

    #[test]
    fn test_config_from_json_defaults() {
        let json = r#"{
            "docs_url_base": "https://example.com/reference",
            "output_dir": "mirror"
        }"#;
        let config: ScrapeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.package_filters.is_empty());
        assert!(config.package_list_source.is_none());
    }
}
