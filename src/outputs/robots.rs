//! robots.txt generation.
//!
//! The file always allows all crawling and points crawlers at the sitemap
//! index. It is rewritten on every run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const ROBOTS_FILENAME: &str = "robots.txt";

/// Contents of robots.txt for the given absolute index URL.
pub fn robots_txt(index_url: &str) -> String {
    format!("User-agent: *\n\nAllow: /\n\nSitemap: {}\n", index_url)
}

/// Write robots.txt into `output_dir`.
#[instrument(level = "info", skip_all, fields(%index_url))]
pub fn write_robots(index_url: &str, output_dir: &Path) -> io::Result<PathBuf> {
    let path = output_dir.join(ROBOTS_FILENAME);
    fs::write(&path, robots_txt(index_url))?;
    info!(path = %path.display(), "robots.txt generated");
    Ok(path)
}
