//! Run configuration.
//!
//! A [`SitemapConfig`] is built once in `main` from three layers, highest
//! priority first:
//!
//! 1. command-line flags and their environment variables ([`Cli`])
//! 2. an optional YAML file ([`FileConfig`], loaded with `serde_yaml`)
//! 3. built-in defaults
//!
//! The resolved value is passed by reference into every pipeline stage; no
//! stage reads globals or the environment.
//!
//! # YAML Example
//!
//! ```yaml
//! base_url: https://example.org
//! root: ./public
//! extensions: [".html", ".htm"]
//! max_urls_per_sitemap: 5000
//! output_dir: ./public
//! index_strategy: rescan
//! ping: true
//! ```

use crate::cli::Cli;
use crate::outputs::index::INDEX_FILENAME;
use crate::ping::DEFAULT_PING_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Upper bound on `url` entries per sub-sitemap imposed by the sitemap protocol.
pub const PROTOCOL_MAX_URLS: usize = 5000;

/// Default file name suffixes that are turned into URLs.
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".html", ".php"];

const DEFAULT_PING_TIMEOUT_SECS: u64 = 10;

/// How the sitemap index chooses the sub-sitemaps it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IndexStrategy {
    /// Only the files written during the current run.
    Session,
    /// Every `sitemap-*.xml` found in the output directory, whichever run created it.
    #[default]
    Rescan,
}

/// Shape of the optional YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub root: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub max_urls_per_sitemap: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub index_strategy: Option<IndexStrategy>,
    pub ping: Option<bool>,
    pub ping_endpoint: Option<String>,
    pub ping_timeout_secs: Option<u64>,
    pub report_path: Option<PathBuf>,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct SitemapConfig {
    /// Site base URL without a trailing slash.
    pub base_url: String,
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub max_urls_per_sitemap: usize,
    pub output_dir: PathBuf,
    pub index_strategy: IndexStrategy,
    pub ping: bool,
    pub ping_endpoint: String,
    pub ping_timeout: Duration,
    pub report_path: Option<PathBuf>,
}

impl SitemapConfig {
    /// Build a configuration with every option at its default.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            root: PathBuf::from("."),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_urls_per_sitemap: PROTOCOL_MAX_URLS,
            output_dir: PathBuf::from("."),
            index_strategy: IndexStrategy::default(),
            ping: false,
            ping_endpoint: DEFAULT_PING_ENDPOINT.to_string(),
            ping_timeout: Duration::from_secs(DEFAULT_PING_TIMEOUT_SECS),
            report_path: None,
        })
    }

    /// Load the config file named by `--config` (if any) and merge it with the CLI.
    #[instrument(level = "info", skip_all)]
    pub fn from_cli(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let file = match &cli.config {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    /// Merge CLI values over file values over defaults, then validate.
    ///
    /// # Errors
    ///
    /// Fails when no base URL is given anywhere, when the base URL is not an
    /// absolute http(s) URL, when the per-sitemap limit is outside
    /// `1..=5000`, or when the extension list is empty.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, Box<dyn Error>> {
        let base_url = cli
            .base_url
            .clone()
            .or(file.base_url)
            .ok_or("a base URL is required (--base-url, SITEMAP_BASE_URL or `base_url` in the config file)")?;

        let mut config = Self::new(&base_url)?;

        if let Some(root) = cli.root.clone().or(file.root) {
            config.root = root;
        }
        if let Some(extensions) = cli.extensions.clone().or(file.extensions) {
            config.extensions = extensions
                .into_iter()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Some(max) = cli.max_urls.or(file.max_urls_per_sitemap) {
            config.max_urls_per_sitemap = max;
        }
        if let Some(output_dir) = cli.output_dir.clone().or(file.output_dir) {
            config.output_dir = output_dir;
        }
        if let Some(strategy) = cli.index_strategy.or(file.index_strategy) {
            config.index_strategy = strategy;
        }
        config.ping = match (cli.ping, cli.no_ping) {
            (true, _) => true,
            (_, true) => false,
            _ => file.ping.unwrap_or(false),
        };
        if let Some(endpoint) = cli.ping_endpoint.clone().or(file.ping_endpoint) {
            config.ping_endpoint = endpoint;
        }
        if let Some(secs) = cli.ping_timeout_secs.or(file.ping_timeout_secs) {
            config.ping_timeout = Duration::from_secs(secs);
        }
        config.report_path = cli.report.clone().or(file.report_path);

        config.validate()?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.max_urls_per_sitemap == 0 || self.max_urls_per_sitemap > PROTOCOL_MAX_URLS {
            return Err(format!(
                "max URLs per sitemap must be between 1 and {}, got {}",
                PROTOCOL_MAX_URLS, self.max_urls_per_sitemap
            )
            .into());
        }
        if self.extensions.is_empty() {
            return Err("at least one file extension must be configured".into());
        }
        Ok(())
    }

    /// Absolute URL of the sitemap index, as referenced by robots.txt and the ping.
    pub fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, INDEX_FILENAME)
    }
}

/// Read and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_file_config(path: &Path) -> Result<FileConfig, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config file {}: {}", path.display(), e))?;
    let file: FileConfig = serde_yaml::from_str(&raw)
        .map_err(|e| format!("invalid config file {}: {}", path.display(), e))?;
    info!("Loaded config file");
    Ok(file)
}

/// Validate a base URL and strip trailing slashes so `base + "/" + path` is well formed.
pub fn normalize_base_url(raw: &str) -> Result<String, Box<dyn Error>> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| format!("invalid base URL {:?}: {}", raw, e))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(format!("base URL must be an absolute http(s) URL, got {:?}", raw).into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["sitemap_forge"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = SitemapConfig::resolve(&cli(&["-b", "https://x.io"]), FileConfig::default()).unwrap();
        assert_eq!(config.base_url, "https://x.io");
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.extensions, vec![".html", ".php"]);
        assert_eq!(config.max_urls_per_sitemap, 5000);
        assert_eq!(config.index_strategy, IndexStrategy::Rescan);
        assert!(!config.ping);
        assert_eq!(config.ping_endpoint, "https://www.bing.com/ping");
        assert_eq!(config.ping_timeout, Duration::from_secs(10));
        assert!(config.report_path.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = SitemapConfig::new("https://x.io/docs/").unwrap();
        assert_eq!(config.base_url, "https://x.io/docs");
        assert_eq!(config.index_url(), "https://x.io/docs/sitemap.xml");
    }

    #[test]
    fn test_base_url_must_be_absolute_http() {
        assert!(normalize_base_url("example.org").is_err());
        assert!(normalize_base_url("ftp://example.org").is_err());
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("http://example.org").is_ok());
    }

    #[test]
    fn test_max_urls_bounds() {
        let file = FileConfig::default();
        assert!(SitemapConfig::resolve(&cli(&["-b", "https://x.io", "-m", "0"]), file).is_err());
        let file = FileConfig::default();
        assert!(SitemapConfig::resolve(&cli(&["-b", "https://x.io", "-m", "5001"]), file).is_err());
        let file = FileConfig::default();
        let ok = SitemapConfig::resolve(&cli(&["-b", "https://x.io", "-m", "2"]), file).unwrap();
        assert_eq!(ok.max_urls_per_sitemap, 2);
    }

    #[test]
    fn test_empty_extension_list_rejected() {
        let res = SitemapConfig::resolve(&cli(&["-b", "https://x.io", "-e", " ,"]), FileConfig::default());
        assert!(res.is_err());
    }

    #[test]
    fn test_yaml_file_merged_under_cli() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sitemap.yaml");
        fs::write(
            &path,
            "base_url: https://from-file.io\n\
             root: ./site\n\
             extensions: [\".htm\"]\n\
             index_strategy: session\n\
             ping: true\n\
             ping_timeout_secs: 3\n\
             report_path: ./report.json\n",
        )
        .unwrap();

        let file = load_file_config(&path).unwrap();
        let config = SitemapConfig::resolve(&cli(&["-b", "https://from-cli.io", "-r", "./cli-root"]), file).unwrap();

        assert_eq!(config.base_url, "https://from-cli.io");
        assert_eq!(config.root, PathBuf::from("./cli-root"));
        assert_eq!(config.extensions, vec![".htm"]);
        assert_eq!(config.index_strategy, IndexStrategy::Session);
        assert!(config.ping);
        assert_eq!(config.ping_timeout, Duration::from_secs(3));
        assert_eq!(config.report_path, Some(PathBuf::from("./report.json")));
    }

    #[test]
    fn test_cli_no_ping_overrides_file() {
        let file = FileConfig {
            ping: Some(true),
            ..FileConfig::default()
        };
        let config = SitemapConfig::resolve(&cli(&["-b", "https://x.io", "--no-ping"]), file).unwrap();
        assert!(!config.ping);

        let file = FileConfig {
            ping: Some(true),
            ..FileConfig::default()
        };
        let config = SitemapConfig::resolve(&cli(&["-b", "https://x.io"]), file).unwrap();
        assert!(config.ping);

        let file = FileConfig {
            ping: Some(false),
            ..FileConfig::default()
        };
        let config = SitemapConfig::resolve(&cli(&["-b", "https://x.io", "--ping"]), file).unwrap();
        assert!(config.ping);
    }

    #[test]
    fn test_yaml_unknown_key_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "base_url: https://x.io\nlimit: 3\n").unwrap();
        assert!(load_file_config(&path).is_err());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(load_file_config(&tmp.path().join("nope.yaml")).is_err());
    }
}
