//! ConfigState: the authoritative in-memory feed configuration.
//!
//! The coordinator is the sole writer of the persistent store; every other
//! component observes configuration exclusively through snapshots served by
//! this type. `ConfigState` mediates all reads and writes and owns the one
//! real state machine in the repository:
//!
//! ```text
//! Uninitialized ──► Loading ──► Ready
//!                      ▲           │
//!                      └── save ───┘
//! ```
//!
//! - `Uninitialized`: defaults only, no store read attempted yet.
//! - `Loading`: one load (or save-then-reload) in flight; `current()` keeps
//!   returning the prior snapshot.
//! - `Ready`: the last cycle completed, successfully or with a reported,
//!   swallowed error.
//!
//! A save re-enters `Loading` rather than adding a new state: after the
//! record is written, the state *reloads from the store* instead of trusting
//! the values it was handed, so the in-memory configuration always reflects
//! what is durably stored.
//!
//! # Consistency
//!
//! Concurrent saves are not serialized beyond runtime event ordering; the
//! last write-then-reload to complete wins. Saves are human-driven (a user
//! submitting the options form), so the race is accepted rather than locked
//! away. Snapshot reads are always whole-struct copies; a reader never sees
//! a half-updated endpoint/token pair.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use crec_core::{ContentConfig, StoredConfig};
use thiserror::Error;
use tracing::{debug, warn};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for persistent store operations.
///
/// Infrastructure implementations map their I/O and parse failures into
/// these variants; the application layer never sees a raw `io::Error`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached, read, or written.
    #[error("config store unavailable: {0}")]
    Unavailable(String),

    /// The store returned data that is not a valid configuration record.
    #[error("malformed config record: {0}")]
    Malformed(String),
}

// ── Dependency seams ──────────────────────────────────────────────────────────

/// Trait for the persistent configuration store.
///
/// Models the platform's durable key-value storage: asynchronous get/set of
/// a two-key record that survives process restarts. The file-backed
/// implementation lives in the infrastructure layer; test implementations
/// keep the record in memory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Reads the stored record. A store that has never been written returns
    /// the empty record, not an error.
    async fn read(&self) -> Result<StoredConfig, StoreError>;

    /// Replaces the stored record as a single logical operation.
    async fn write(&self, record: &StoredConfig) -> Result<(), StoreError>;
}

/// Trait for the cache-warming prefetch trigger.
///
/// `trigger` must return immediately: implementations dispatch the network
/// request on their own task and never report its outcome. Test
/// implementations record the URL instead of fetching it.
#[cfg_attr(test, mockall::automock)]
pub trait FeedPrefetcher: Send + Sync {
    /// Issues one fire-and-forget request for the configured feed.
    fn trigger(&self, config: &ContentConfig);
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Where the state machine currently is. See the module docs for the
/// transition diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Defaults only; no store read attempted.
    Uninitialized,
    /// One load (or save-then-reload) in flight.
    Loading,
    /// Last load/save cycle completed.
    Ready,
}

// ── Config state ──────────────────────────────────────────────────────────────

/// The process-wide owner of the feed configuration.
///
/// Constructed once at startup with its store and prefetcher injected, then
/// shared as `Arc<ConfigState>` between the message router and the startup
/// hydration path.
pub struct ConfigState {
    /// The current effective configuration. Guards are held only for the
    /// duration of a clone or a whole-struct replacement, never across an
    /// await point.
    current: RwLock<ContentConfig>,
    lifecycle: RwLock<Lifecycle>,
    store: Arc<dyn ConfigStore>,
    prefetcher: Arc<dyn FeedPrefetcher>,
}

impl ConfigState {
    /// Creates a state holding the documented defaults, with no store read
    /// attempted yet.
    pub fn new(store: Arc<dyn ConfigStore>, prefetcher: Arc<dyn FeedPrefetcher>) -> Self {
        Self {
            current: RwLock::new(ContentConfig::default()),
            lifecycle: RwLock::new(Lifecycle::Uninitialized),
            store,
            prefetcher,
        }
    }

    /// Returns the current configuration snapshot.
    ///
    /// Never blocks on I/O and never fails: before the first load completes
    /// this is the defaults, afterwards the last successfully loaded values.
    pub fn current(&self) -> ContentConfig {
        self.current.read().expect("config lock poisoned").clone()
    }

    /// Returns the current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.read().expect("lifecycle lock poisoned")
    }

    /// Hydrates the in-memory configuration from the persistent store.
    ///
    /// On success, stored fields that are present and non-empty overwrite
    /// the in-memory values; the rest keep their current value. If the
    /// stored record was incomplete, the effective (default-filled) record
    /// is written back in the same cycle so the store converges to a fully
    /// populated record. Exactly one prefetch is triggered afterwards.
    ///
    /// # Errors
    ///
    /// A store-read failure is returned after being logged; the in-memory
    /// configuration is left unchanged and the prefetch is skipped for this
    /// cycle. Callers treat the error as non-fatal.
    pub async fn load(&self) -> Result<(), StoreError> {
        self.set_lifecycle(Lifecycle::Loading);

        let stored = match self.store.read().await {
            Ok(stored) => stored,
            Err(e) => {
                self.set_lifecycle(Lifecycle::Ready);
                warn!("failed to read config store: {e}");
                return Err(e);
            }
        };

        let effective = self.current().merged_with(&stored);
        *self.current.write().expect("config lock poisoned") = effective.clone();
        self.set_lifecycle(Lifecycle::Ready);
        debug!(endpoint = %effective.endpoint, "configuration loaded");

        if !stored.is_complete() {
            // Write-back healing: after this, every later load finds both
            // fields present. A failure here only delays the convergence.
            if let Err(e) = self.store.write(&StoredConfig::from(&effective)).await {
                warn!("failed to write default-filled config back to store: {e}");
            }
        }

        self.prefetcher.trigger(&effective);
        Ok(())
    }

    /// Persists a new configuration and resynchronizes from the store.
    ///
    /// Both values are opaque strings; no URL or token validation happens
    /// here. The write replaces the whole record, and a successful write is
    /// followed by a full [`load`](Self::load), so a caller that awaits this
    /// method observes the durably stored values afterwards.
    ///
    /// # Errors
    ///
    /// A store-write failure is returned after being logged; no reload runs,
    /// so the in-memory configuration stays at the last loaded values
    /// (stale relative to the caller's intent).
    pub async fn save(&self, endpoint: String, token: String) -> Result<(), StoreError> {
        self.set_lifecycle(Lifecycle::Loading);

        let record = StoredConfig {
            endpoint: Some(endpoint),
            token: Some(token),
        };

        if let Err(e) = self.store.write(&record).await {
            self.set_lifecycle(Lifecycle::Ready);
            warn!("failed to persist configuration: {e}");
            return Err(e);
        }

        // Read-after-write: trust the store, not the echoed values.
        self.load().await
    }

    fn set_lifecycle(&self, next: Lifecycle) {
        *self.lifecycle.write().expect("lifecycle lock poisoned") = next;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
