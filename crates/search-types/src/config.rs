//! Configuration loading for parish search.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/parish-search/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::content::ContentTypeConfig;
use crate::error::SearchError;

/// Environment variable prefix, e.g. `PARISH_SEARCH__API_URL`.
pub const ENV_PREFIX: &str = "PARISH_SEARCH";

/// Search engine connection and content settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the search engine (e.g. https://search.example.com:7700)
    #[serde(default)]
    pub api_url: String,

    /// Search-only API key
    #[serde(default)]
    pub api_key: String,

    /// Default result count when the caller gives none
    #[serde(default = "default_results_per_page")]
    pub results_per_page: u32,

    #[serde(default = "default_true")]
    pub enable_files: bool,

    #[serde(default = "default_true")]
    pub enable_posts: bool,

    #[serde(default = "default_true")]
    pub enable_pages: bool,

    #[serde(default = "default_true")]
    pub enable_faqs: bool,

    #[serde(default = "default_true")]
    pub enable_events: bool,

    /// Index queried by searches
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Timeout for search requests (seconds)
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,

    /// Timeout for health checks (seconds)
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_results_per_page() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_index_name() -> String {
    "parish_search".to_string()
}

fn default_search_timeout_secs() -> u64 {
    10
}

fn default_health_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            results_per_page: default_results_per_page(),
            enable_files: true,
            enable_posts: true,
            enable_pages: true,
            enable_faqs: true,
            enable_events: true,
            index_name: default_index_name(),
            search_timeout_secs: default_search_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/parish-search/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (PARISH_SEARCH__*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, SearchError> {
        let config_dir = ProjectDirs::from("", "", "parish-search")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("results_per_page", default_results_per_page() as i64)
            .map_err(|e| SearchError::Config(e.to_string()))?
            .set_default("index_name", default_index_name())
            .map_err(|e| SearchError::Config(e.to_string()))?
            .set_default("search_timeout_secs", default_search_timeout_secs() as i64)
            .map_err(|e| SearchError::Config(e.to_string()))?
            .set_default("health_timeout_secs", default_health_timeout_secs() as i64)
            .map_err(|e| SearchError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| SearchError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Whether both the API URL and key are present.
    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// API URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    /// Content types searched when the caller does not pick one.
    pub fn content_types(&self) -> ContentTypeConfig {
        ContentTypeConfig {
            files: self.enable_files,
            posts: self.enable_posts,
            pages: self.enable_pages,
            faqs: self.enable_faqs,
            events: self.enable_events,
        }
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// Copy of these settings safe to print, with the API key masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.api_key.is_empty() {
            copy.api_key = "********".to_string();
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.results_per_page, 10);
        assert_eq!(settings.index_name, "parish_search");
        assert_eq!(settings.search_timeout(), Duration::from_secs(10));
        assert_eq!(settings.health_timeout(), Duration::from_secs(5));
        assert!(!settings.is_configured());
        assert_eq!(settings.content_types(), ContentTypeConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
api_url = "https://search.example.com/"
api_key = "search-key"
results_per_page = 20
enable_faqs = false
"#
        )
        .unwrap();

        let settings = Settings::load(Some(&path.to_string_lossy())).unwrap();
        assert_eq!(settings.base_url(), "https://search.example.com");
        assert_eq!(settings.results_per_page, 20);
        assert!(settings.is_configured());
        assert!(!settings.content_types().faqs);
        assert!(settings.content_types().files);
    }

    #[test]
    fn test_load_missing_cli_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let result = Settings::load(Some(&path.to_string_lossy()));
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[test]
    fn test_is_configured_requires_both() {
        let mut settings = Settings {
            api_url: "https://search.example.com".to_string(),
            ..Default::default()
        };
        assert!(!settings.is_configured());
        settings.api_key = "key".to_string();
        assert!(settings.is_configured());
        settings.api_url = "   ".to_string();
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_redacted_masks_key() {
        let settings = Settings {
            api_key: "secret".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.redacted().api_key, "********");
        assert_eq!(Settings::default().redacted().api_key, "");
    }
}
