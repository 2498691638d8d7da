//! # Sitemap Forge
//!
//! Crawls a local directory of static site files and writes sitemap XML for
//! search engines, together with a `robots.txt` that points at it.
//!
//! ## Features
//!
//! - Maps `.html` / `.php` files (configurable) to absolute URLs, collapsing a
//!   root `index.html` / `index.php` to the bare base URL
//! - Skips hidden directories, `node_modules`, `.git` and `.github`
//! - Splits URLs into sub-sitemaps of at most 5000 entries
//! - Writes a sitemap index built from this run's files or from every
//!   `sitemap-*.xml` in the output directory
//! - Optionally pings a search engine and writes a JSON run report
//!
//! ## Usage
//!
//! ```sh
//! sitemap_forge --base-url https://example.org --root ./public --output-dir ./public
//! ```
//!
//! ## Architecture
//!
//! The application is a single linear pipeline (see [`pipeline`]):
//! 1. **Collect**: walk the site root and build the URL set
//! 2. **Sitemaps**: write chunked `urlset` documents
//! 3. **Index**: write `sitemap.xml`
//! 4. **Ancillary**: write `robots.txt`, optionally ping, optionally report

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod config;
mod models;
mod outputs;
mod ping;
mod pipeline;
mod utils;

use cli::Cli;
use config::SitemapConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("sitemap_forge starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = SitemapConfig::from_cli(&args).inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    let summary = pipeline::run(&config)
        .await
        .inspect_err(|e| error!(error = %e, "Sitemap generation failed"))?;

    let elapsed = start_time.elapsed();
    info!(
        urls = summary.url_count,
        sitemaps_written = summary.sitemap_files.len(),
        index_entries = summary.index_entries.len(),
        index_url = %summary.index_url,
        ping = ?summary.ping,
        ?elapsed,
        "Execution complete"
    );

    Ok(())
}
