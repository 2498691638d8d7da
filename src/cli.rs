//! Command-line interface definitions for Sitemap Forge.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most arguments can be provided via command-line flags or environment
//! variables, and every one of them may also come from a YAML config file
//! (see [`crate::config`]). Values given here win over the config file.

use crate::config::IndexStrategy;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Sitemap Forge application.
///
/// Everything is optional at the parser level so that the config file can
/// fill the gaps; [`crate::config::SitemapConfig::resolve`] enforces what is
/// actually required (the base URL).
///
/// # Examples
///
/// ```sh
/// # Scan the current directory and write output next to it
/// sitemap_forge --base-url https://example.org
///
/// # Scan ./public, write into ./dist, index only this run's files
/// sitemap_forge -b https://example.org -r ./public -o ./dist --index-strategy session
///
/// # Everything from a config file, plus a search engine ping
/// sitemap_forge -c sitemap.yaml --ping
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Absolute base URL of the site, e.g. https://example.org
    #[arg(short, long, env = "SITEMAP_BASE_URL")]
    pub base_url: Option<String>,

    /// Root directory of the site files to scan [default: .]
    #[arg(short, long, env = "SITEMAP_ROOT")]
    pub root: Option<PathBuf>,

    /// Comma-separated file name suffixes to include [default: .html,.php]
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Maximum number of URLs per sub-sitemap (1..=5000) [default: 5000]
    #[arg(short, long)]
    pub max_urls: Option<usize>,

    /// Directory the sitemaps and robots.txt are written to [default: .]
    #[arg(short, long, env = "SITEMAP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Which sub-sitemaps the index references [default: rescan]
    #[arg(short, long, value_enum)]
    pub index_strategy: Option<IndexStrategy>,

    /// Notify the search engine ping endpoint after writing the index
    #[arg(short, long, overrides_with = "no_ping")]
    pub ping: bool,

    /// Never ping, even if the config file enables it
    #[arg(long, overrides_with = "ping")]
    pub no_ping: bool,

    /// Ping endpoint; the index URL is appended as `?sitemap=<url>`
    #[arg(long)]
    pub ping_endpoint: Option<String>,

    /// Timeout for the ping request, in seconds [default: 10]
    #[arg(long)]
    pub ping_timeout_secs: Option<u64>,

    /// Optional path for a JSON report describing the run
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
