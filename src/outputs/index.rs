//! Sitemap index (`sitemap.xml`) generation.
//!
//! # Strategies
//!
//! - [`IndexStrategy::Session`]: the index lists exactly the sub-sitemaps
//!   written by the current run.
//! - [`IndexStrategy::Rescan`]: the output directory is scanned for every file
//!   named `sitemap-*.xml`, so sub-sitemaps left by earlier runs (or copied in
//!   by hand) are indexed too. Repeated runs therefore accumulate entries
//!   until old files are removed.
//!
//! The index itself is rewritten on every run.

use super::render_document;
use crate::config::{IndexStrategy, SitemapConfig};
use crate::utils::{SUB_SITEMAP_PREFIX, today_lastmod};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// File name of the sitemap index.
pub const INDEX_FILENAME: &str = "sitemap.xml";

static SUB_SITEMAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}.*\.xml$", regex::escape(SUB_SITEMAP_PREFIX))).expect("valid sub-sitemap pattern")
});

/// Whether `name` looks like a sub-sitemap (`sitemap-*.xml`).
pub fn is_sub_sitemap(name: &str) -> bool {
    SUB_SITEMAP_RE.is_match(name)
}

/// Decide which sub-sitemap file names the index references.
#[instrument(level = "info", skip(session_files), fields(session = session_files.len()))]
pub fn select_index_entries(
    strategy: IndexStrategy,
    session_files: &[String],
    output_dir: &Path,
) -> io::Result<Vec<String>> {
    let entries = match strategy {
        IndexStrategy::Session => session_files.to_vec(),
        IndexStrategy::Rescan => scan_sub_sitemaps(output_dir)?,
    };
    info!(entries = entries.len(), "Selected index entries");
    Ok(entries)
}

/// Every regular file in `dir` named `sitemap-*.xml`, sorted by name.
pub fn scan_sub_sitemaps(dir: &Path) -> io::Result<Vec<String>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_sub_sitemap(&name) && entry.path().is_file() {
            found.push(name);
        }
    }
    found.sort();
    debug!(files = ?found, "Scanned output directory for sub-sitemaps");
    Ok(found)
}

/// Write `sitemap.xml` referencing `entries` under the configured base URL.
///
/// # Returns
///
/// Path of the written index.
#[instrument(level = "info", skip_all, fields(entries = entries.len()))]
pub fn write_index(entries: &[String], config: &SitemapConfig) -> Result<PathBuf, Box<dyn Error>> {
    let locs = entries
        .iter()
        .map(|file| format!("{}/{}", config.base_url, file))
        .collect::<Vec<_>>();
    let xml = render_document("sitemapindex", "sitemap", locs.iter().map(String::as_str), &today_lastmod())?;

    let path = config.output_dir.join(INDEX_FILENAME);
    fs::write(&path, xml).map_err(|e| format!("cannot write index {}: {}", path.display(), e))?;
    info!(path = %path.display(), "Main index created");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::tests::locs;

    fn config_for(dir: &Path) -> SitemapConfig {
        let mut config = SitemapConfig::new("https://x.io").unwrap();
        config.output_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn test_sub_sitemap_pattern() {
        assert!(is_sub_sitemap("sitemap-1a2b3c4d.xml"));
        assert!(is_sub_sitemap("sitemap-manual-copy.xml"));
        assert!(is_sub_sitemap("sitemap-.xml"));
        assert!(!is_sub_sitemap("sitemap.xml"));
        assert!(!is_sub_sitemap("sitemap-1a2b3c4d.xml.bak"));
        assert!(!is_sub_sitemap("old-sitemap-1.xml"));
    }

    #[test]
    fn test_session_strategy_ignores_leftovers() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("sitemap-deadbeef.xml"), "old").unwrap();

        let session = vec!["sitemap-0badf00d.xml".to_string()];
        let entries = select_index_entries(IndexStrategy::Session, &session, tmp.path()).unwrap();
        assert_eq!(entries, session);
    }

    #[test]
    fn test_rescan_strategy_includes_leftovers() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("sitemap-deadbeef.xml"), "old").unwrap();
        fs::write(tmp.path().join("sitemap-0badf00d.xml"), "new").unwrap();
        fs::write(tmp.path().join("sitemap.xml"), "index").unwrap();
        fs::write(tmp.path().join("robots.txt"), "robots").unwrap();
        fs::create_dir(tmp.path().join("sitemap-dir.xml")).unwrap();

        let session = vec!["sitemap-0badf00d.xml".to_string()];
        let entries = select_index_entries(IndexStrategy::Rescan, &session, tmp.path()).unwrap();
        assert_eq!(entries, vec!["sitemap-0badf00d.xml", "sitemap-deadbeef.xml"]);
    }

    #[test]
    fn test_write_index_document() {
        let tmp = tempfile::tempdir().unwrap();
        let entries = vec!["sitemap-0badf00d.xml".to_string(), "sitemap-deadbeef.xml".to_string()];

        let path = write_index(&entries, &config_for(tmp.path())).unwrap();
        assert_eq!(path, tmp.path().join("sitemap.xml"));

        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.contains(r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert_eq!(xml.matches("<sitemap>").count(), 2);
        assert_eq!(
            locs(&xml),
            vec!["https://x.io/sitemap-0badf00d.xml", "https://x.io/sitemap-deadbeef.xml"]
        );
    }

    #[test]
    fn test_write_index_overwrites_previous() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("sitemap.xml"), "stale").unwrap();

        write_index(&[], &config_for(tmp.path())).unwrap();
        let xml = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert!(xml.contains("<sitemapindex"));
        assert!(!xml.contains("<sitemap>"));
    }
}
