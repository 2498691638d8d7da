//! Utility functions for dates, file naming, string truncation, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - The `lastmod` date stamp written into every sitemap entry
//! - Random sub-sitemap file names
//! - String truncation for logging response bodies
//! - File system validation for the output directory

use chrono::Local;
use rand::{Rng, rng};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Prefix shared by every generated sub-sitemap file name.
pub const SUB_SITEMAP_PREFIX: &str = "sitemap-";

/// Today's local date in `YYYY-MM-DD` form.
///
/// Evaluated on every call, so a document serialized just after midnight is
/// stamped with the new day rather than any file modification time.
pub fn today_lastmod() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Generate an opaque sub-sitemap file name of the form `sitemap-<8 hex>.xml`.
///
/// # Examples
///
/// ```ignore
/// let name = random_sitemap_name();
/// assert!(name.starts_with("sitemap-") && name.ends_with(".xml"));
/// ```
pub fn random_sitemap_name() -> String {
    let id: u32 = rng().random();
    format!("{}{:08x}.xml", SUB_SITEMAP_PREFIX, id)
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (backing off to the
/// nearest character boundary) with an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn ensure_writable_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;
    let probe_path = path.join("..__probe_write__");
    fs::File::create(&probe_path)?;
    remove_probe(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

/// Remove the write probe; a leftover probe is not fatal but is reported.
fn remove_probe(probe_path: &Path) -> bool {
    match fs::remove_file(probe_path) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %probe_path.display(), error = %e, "Could not remove write probe; delete it manually");
            false
        }
    }
}
