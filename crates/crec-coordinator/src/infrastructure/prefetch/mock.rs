//! Recording prefetcher for tests.
//!
//! Stores the URL of every trigger instead of fetching it, so tests can
//! assert exactly how often and against which URL the cache warm fired.

use std::sync::Mutex;

use crec_core::ContentConfig;

use crate::application::config_state::FeedPrefetcher;

/// A [`FeedPrefetcher`] that records instead of fetching.
#[derive(Default)]
pub struct RecordingPrefetcher {
    urls: Mutex<Vec<String>>,
}

impl RecordingPrefetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every warmed URL in trigger order.
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().expect("lock poisoned").clone()
    }

    /// Number of triggers so far.
    pub fn count(&self) -> usize {
        self.urls.lock().expect("lock poisoned").len()
    }
}

impl FeedPrefetcher for RecordingPrefetcher {
    fn trigger(&self, config: &ContentConfig) {
        self.urls
            .lock()
            .expect("lock poisoned")
            .push(config.feed_url());
    }
}
