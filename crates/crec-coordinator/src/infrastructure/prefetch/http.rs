//! HTTP cache-warming prefetcher.
//!
//! After a successful configuration load the coordinator warms downstream
//! caches (CDN, server-side) with one `GET {endpoint}?t={token}`, whether or
//! not any surface currently wants the feed. The request is dispatched on
//! its own Tokio task and never awaited: the response body is discarded,
//! transport errors go nowhere, and there is no retry and no timeout beyond
//! what the HTTP client applies by default. Message-handling latency is
//! therefore independent of feed-server health.

use crec_core::ContentConfig;
use tracing::debug;

use crate::application::config_state::FeedPrefetcher;

/// The production [`FeedPrefetcher`], backed by a shared `reqwest` client.
pub struct HttpPrefetcher {
    client: reqwest::Client,
}

impl HttpPrefetcher {
    /// Creates a prefetcher with its own connection pool.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpPrefetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedPrefetcher for HttpPrefetcher {
    fn trigger(&self, config: &ContentConfig) {
        let url = config.feed_url();
        let request = self
            .client
            .get(url.as_str())
            .header(reqwest::header::ACCEPT, "application/json");

        // Dispatched without awaiting; the outcome never reaches callers.
        tokio::spawn(async move {
            match request.send().await {
                Ok(response) => debug!("cache warm {url}: {}", response.status()),
                Err(e) => debug!("cache warm {url} failed: {e}"),
            }
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
