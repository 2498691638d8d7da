//! Sub-sitemap (`urlset`) generation.
//!
//! URLs are split into chunks of at most `max_urls_per_sitemap` entries and
//! each chunk becomes one `sitemap-<8 hex>.xml` file. Files are created with
//! `create_new`, so an existing file of the same name is never overwritten.
//! If writing chunk *n* fails, chunks before it stay on disk and the error
//! propagates.

use super::render_document;
use crate::config::SitemapConfig;
use crate::utils::{random_sitemap_name, today_lastmod};
use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Write every chunk of `urls` as its own sub-sitemap in the output directory.
///
/// # Returns
///
/// The generated file names, in chunk order. Empty when `urls` is empty.
pub fn write_sitemaps(urls: &[String], config: &SitemapConfig) -> Result<Vec<String>, Box<dyn Error>> {
    write_sitemaps_with(urls, config, &mut random_sitemap_name)
}

/// Like [`write_sitemaps`], drawing each file name from `next_name`.
///
/// Stops at the first chunk that cannot be written; files written before it
/// are left in place.
#[instrument(level = "info", skip_all, fields(urls = urls.len(), output_dir = %config.output_dir.display()))]
pub fn write_sitemaps_with<F>(
    urls: &[String],
    config: &SitemapConfig,
    next_name: &mut F,
) -> Result<Vec<String>, Box<dyn Error>>
where
    F: FnMut() -> String,
{
    let mut generated = Vec::new();

    for (i, chunk) in urls.chunks(config.max_urls_per_sitemap).enumerate() {
        let filename = next_name();
        let path = config.output_dir.join(&filename);
        write_sitemap_file(chunk, &path, &today_lastmod())?;
        info!(chunk = i, urls = chunk.len(), file = %filename, "Sub-sitemap created");
        generated.push(filename);
    }

    Ok(generated)
}

/// Serialize one `urlset` document to `path`.
///
/// # Errors
///
/// Fails if `path` already exists or cannot be written.
pub fn write_sitemap_file(urls: &[String], path: &Path, lastmod: &str) -> Result<(), Box<dyn Error>> {
    let xml = render_document("urlset", "url", urls.iter().map(String::as_str), lastmod)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| format!("cannot create sub-sitemap {}: {}", path.display(), e))?;
    file.write_all(&xml)?;
    Ok(())
}
