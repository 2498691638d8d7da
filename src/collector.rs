//! Site file discovery and path-to-URL mapping.
//!
//! Walks the site root depth-first, skipping hidden and tooling directories,
//! and turns every file whose name ends with an allowed suffix into an
//! absolute URL.
//!
//! # URL Mapping
//!
//! | Relative path        | URL                          |
//! |----------------------|------------------------------|
//! | `index.html`         | `https://x.io/`              |
//! | `about.html`         | `https://x.io/about.html`    |
//! | `docs/index.php`     | `https://x.io/docs/index.php` |
//! | `docs/guide.html`    | `https://x.io/docs/guide.html` |
//!
//! Only a default document at the root collapses to the bare base URL;
//! nested ones keep their file name.
//!
//! Entries whose names are not valid UTF-8 have no faithful URL and are
//! skipped with a warning. Errors from `read_dir` (missing root, permission
//! denied on a subdirectory) propagate to the caller unchanged.

use itertools::Itertools;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Directory names that are never descended into, in addition to any name starting with `.`.
pub const EXCLUDED_DIRS: [&str; 3] = ["node_modules", ".git", ".github"];

/// Root-relative paths that map to the bare base URL.
pub const DEFAULT_DOCUMENTS: [&str; 2] = ["index.html", "index.php"];

/// Collect the deduplicated set of site URLs under `root`.
///
/// # Arguments
///
/// * `root` - Site root directory
/// * `extensions` - Allowed file name suffixes (case-sensitive, e.g. `.html`)
/// * `base_url` - Site base URL without trailing slash
///
/// # Returns
///
/// Unique URLs in walk order (entries sorted by name within each directory,
/// first occurrence wins).
#[instrument(level = "info", skip_all, fields(root = %root.display()))]
pub fn collect_urls(root: &Path, extensions: &[String], base_url: &str) -> io::Result<Vec<String>> {
    let mut urls = Vec::new();
    traverse(root, root, extensions, base_url, &mut urls)?;

    let found = urls.len();
    let unique = urls.into_iter().unique().collect::<Vec<_>>();
    info!(found, unique = unique.len(), "Collected site URLs");
    Ok(unique)
}

fn traverse(
    dir: &Path,
    root: &Path,
    extensions: &[String],
    base_url: &str,
    urls: &mut Vec<String>,
) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %path.display(), "Skipping entry with a non UTF-8 name");
            continue;
        };

        if entry.file_type()?.is_dir() {
            if is_excluded_dir(&name) {
                debug!(dir = %path.display(), "Skipping excluded directory");
                continue;
            }
            traverse(&path, root, extensions, base_url, urls)?;
        } else if path.is_file() && has_allowed_extension(&name, extensions) {
            let rel = path.strip_prefix(root).map_err(io::Error::other)?;
            urls.push(path_to_url(base_url, rel));
        }
    }
    Ok(())
}

/// Hidden directories and the fixed tooling list are skipped.
pub fn is_excluded_dir(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name)
}

pub fn has_allowed_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

/// Map a root-relative file path to its absolute URL.
///
/// Callers pass paths whose components are valid UTF-8.
pub fn path_to_url(base_url: &str, rel: &Path) -> String {
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .join("/");
    format!("{}/{}", base_url, url_segment(&rel))
}

/// `index.html` and `index.php` at the root become the empty segment.
fn url_segment(rel: &str) -> &str {
    if DEFAULT_DOCUMENTS.contains(&rel) { "" } else { rel }
}
