//! Search engine ping notification.
//!
//! After the index is written the run may notify a search engine with a
//! single `GET <endpoint>?sitemap=<url-encoded index URL>`. This is the only
//! network call the tool makes and the only failure it recovers from: any
//! transport error or non-2xx answer is logged as a warning and reported as
//! [`PingOutcome::Failed`], never as an error.

use crate::models::PingOutcome;
use crate::utils::truncate_for_log;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Default ping endpoint.
pub const DEFAULT_PING_ENDPOINT: &str = "https://www.bing.com/ping";

/// Full ping URL for `index_url`.
pub fn ping_url(endpoint: &str, index_url: &str) -> String {
    format!("{}?sitemap={}", endpoint, urlencoding::encode(index_url))
}

/// Notify `endpoint` that the sitemap at `index_url` changed.
///
/// Never fails; the outcome is returned for the run summary.
#[instrument(level = "info", skip_all, fields(%endpoint, %index_url))]
pub async fn ping_search_engine(endpoint: &str, index_url: &str, timeout: Duration) -> PingOutcome {
    let t0 = Instant::now();
    match send_ping(endpoint, index_url, timeout).await {
        Ok(http_status) => {
            info!(http_status, elapsed_ms = t0.elapsed().as_millis() as u64, "Search engine ping delivered");
            PingOutcome::Delivered { http_status }
        }
        Err(e) => {
            warn!(
                elapsed_ms = t0.elapsed().as_millis() as u64,
                error = %e,
                "Search engine ping failed; sitemaps are unaffected"
            );
            PingOutcome::Failed { reason: e.to_string() }
        }
    }
}

async fn send_ping(endpoint: &str, index_url: &str, timeout: Duration) -> Result<u16, Box<dyn Error>> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(ping_url(endpoint, index_url)).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("ping endpoint answered {}: {}", status, truncate_for_log(&body, 200)).into());
    }
    Ok(status.as_u16())
}
