//! JSON run report.
//!
//! When a report path is configured, the [`RunSummary`] is written as pretty
//! JSON after every other artifact, so a failed report never hides sitemaps
//! that were already produced.

use crate::models::RunSummary;
use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::{error, info, instrument};

/// Serialize `summary` to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn write_report(summary: &RunSummary, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(summary)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            error!(dir = %parent.display(), error = %e, "Failed to create report dir");
            return Err(e.into());
        }
    }

    fs::write(path, json)?;
    info!("Wrote run report");
    Ok(())
}
