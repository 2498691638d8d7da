//! Data models describing the outcome of a generation run.
//!
//! - [`RunSummary`]: everything a run produced, serialized for the JSON report
//! - [`PingOutcome`]: result of the optional search engine notification

use serde::{Deserialize, Serialize};

/// Result of the optional search engine ping.
///
/// A failed ping is an outcome, not an error: the run still succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PingOutcome {
    /// Ping disabled in the configuration.
    Skipped,
    /// The endpoint answered with a 2xx status.
    Delivered { http_status: u16 },
    /// Transport error or non-2xx answer.
    Failed { reason: String },
}

/// Everything a single run produced.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunSummary {
    /// Site base URL the entries were built from.
    pub base_url: String,
    /// Local timestamp of the run in RFC 3339 format.
    pub generated_at: String,
    /// Number of unique URLs collected from the site root.
    pub url_count: usize,
    /// Sub-sitemap files written by this run, in write order.
    pub sitemap_files: Vec<String>,
    /// Sub-sitemap files referenced by `sitemap.xml`.
    pub index_entries: Vec<String>,
    /// Absolute URL of the sitemap index.
    pub index_url: String,
    pub ping: PingOutcome,
}
