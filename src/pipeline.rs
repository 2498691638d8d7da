//! The generation pipeline.
//!
//! Stages run strictly in order and each consumes the full output of the
//! previous one:
//!
//! 1. **Preflight**: make sure the output directory exists and is writable
//! 2. **Collect**: walk the site root and map files to URLs
//! 3. **Sub-sitemaps**: write one `sitemap-<hex>.xml` per chunk of URLs
//! 4. **Index**: write `sitemap.xml` using the configured strategy
//! 5. **robots.txt**: point crawlers at the index
//! 6. **Ping**: optional, failures are downgraded to warnings
//! 7. **Report**: optional JSON summary
//!
//! Any error in stages 1-5 or 7 aborts the run; files already written stay
//! on disk.

use crate::collector::collect_urls;
use crate::config::SitemapConfig;
use crate::models::{PingOutcome, RunSummary};
use crate::outputs::index::{select_index_entries, write_index};
use crate::outputs::report::write_report;
use crate::outputs::robots::write_robots;
use crate::outputs::sitemap::write_sitemaps;
use crate::ping::ping_search_engine;
use crate::utils::ensure_writable_dir;
use chrono::Local;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};

/// Run every stage once with `config`.
///
/// # Returns
///
/// A [`RunSummary`] describing what was written. A failed ping is recorded in
/// the summary and does not make this function fail.
#[instrument(level = "info", skip_all, fields(base_url = %config.base_url))]
pub async fn run(config: &SitemapConfig) -> Result<RunSummary, Box<dyn Error>> {
    info!(
        root = %config.root.display(),
        output_dir = %config.output_dir.display(),
        strategy = ?config.index_strategy,
        "Starting sitemap and robots generation"
    );

    if let Err(e) = ensure_writable_dir(&config.output_dir) {
        error!(
            path = %config.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let urls = collect_urls(&config.root, &config.extensions, &config.base_url)?;
    info!(count = urls.len(), "Found URLs");

    let sitemap_files = if urls.is_empty() {
        warn!(
            root = %config.root.display(),
            extensions = ?config.extensions,
            "No matching files found; no sub-sitemaps written"
        );
        Vec::new()
    } else {
        write_sitemaps(&urls, config)?
    };

    let index_entries = select_index_entries(config.index_strategy, &sitemap_files, &config.output_dir)?;
    write_index(&index_entries, config)?;

    let index_url = config.index_url();
    write_robots(&index_url, &config.output_dir)?;

    let ping = if config.ping {
        ping_search_engine(&config.ping_endpoint, &index_url, config.ping_timeout).await
    } else {
        debug!("Search engine ping disabled");
        PingOutcome::Skipped
    };

    let summary = RunSummary {
        base_url: config.base_url.clone(),
        generated_at: Local::now().to_rfc3339(),
        url_count: urls.len(),
        sitemap_files,
        index_entries,
        index_url,
        ping,
    };

    if let Some(path) = &config.report_path {
        write_report(&summary, path)?;
    }

    Ok(summary)
}
