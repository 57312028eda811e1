//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SiteSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Seed URL and CSS selectors
    #[serde(default)]
    pub site: SiteSelectors,

    /// Output locations
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, using defaults only when the file is absent.
    ///
    /// A file that exists but cannot be read or parsed is an
    /// [`AppError::Config`] rather than a silent fallback.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
            .map_err(|e| AppError::config(format!("failed to load {}: {}", path.display(), e)))
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.batch_size == 0 {
            return Err(AppError::validation("crawler.batch_size must be > 0"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::validation("crawler.max_pages must be > 0"));
        }
        url::Url::parse(&self.site.seed_url)
            .map_err(|e| AppError::validation(format!("site.seed_url is invalid: {e}")))?;
        if self.site.link_attr.trim().is_empty() {
            return Err(AppError::validation("site.link_attr is empty"));
        }
        if self.paths.links_file.trim().is_empty() || self.paths.records_file.trim().is_empty() {
            return Err(AppError::validation("paths.links_file and paths.records_file must be set"));
        }
        if self.paths.aggregate_file.as_deref() == Some(self.paths.records_file.as_str()) {
            return Err(AppError::validation(
                "paths.aggregate_file must differ from paths.records_file",
            ));
        }
        self.site.validate()
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Number of article pages fetched together
    #[serde(default = "defaults::batch_size")]
    pub batch_size: usize,

    /// Upper bound on listing pages followed during pagination
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            batch_size: defaults::batch_size(),
            max_pages: defaults::max_pages(),
        }
    }
}

/// Output file locations, relative to the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for every output file
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Collected article links
    #[serde(default = "defaults::links_file")]
    pub links_file: String,

    /// Records appended batch by batch
    #[serde(default = "defaults::records_file")]
    pub records_file: String,

    /// Optional file receiving the full result set once the run ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_file: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            links_file: defaults::links_file(),
            records_file: defaults::records_file(),
            aggregate_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; growthlist-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn batch_size() -> usize {
        5
    }
    pub fn max_pages() -> usize {
        1000
    }

    // Path defaults
    pub fn output_dir() -> String {
        "extractedData".into()
    }
    pub fn links_file() -> String {
        "links.json".into()
    }
    pub fn records_file() -> String {
        "companies.json".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_batch_size() {
        let mut config = Config::default();
        config.crawler.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_seed() {
        let mut config = Config::default();
        config.site.seed_url = "/author/admin/page/1/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_aggregate_equal_to_records_file() {
        let mut config = Config::default();
        config.paths.aggregate_file = Some(config.paths.records_file.clone());
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            batch_size = 3

            [site]
            seed_url = "https://example.com/page/1/"
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.batch_size, 3);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.site.seed_url, "https://example.com/page/1/");
        assert_eq!(config.site.next_page_selector, "div > a.next");
        assert_eq!(config.paths.records_file, "companies.json");
        assert!(config.paths.aggregate_file.is_none());
    }

    #[test]
    fn bundled_config_is_valid() {
        let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/storage/config.toml"))
            .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.crawler.batch_size, 5);
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/config.toml").unwrap();
        assert_eq!(config.crawler.batch_size, 5);
    }

    #[test]
    fn load_or_default_rejects_malformed_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[crawler\nbatch_size = 2").unwrap();

        match Config::load_or_default(&path) {
            Err(AppError::Config(message)) => assert!(message.contains("config.toml")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
