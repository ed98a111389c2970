//! Mock configuration store for tests.
//!
//! Keeps the record in memory, counts every read and write, and can be told
//! to fail either operation. Lets tests drive the coordinator's full
//! load/save/heal lifecycle without touching a disk.

use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Mutex,
};

use async_trait::async_trait;
use crec_core::StoredConfig;

use crate::application::config_state::{ConfigStore, StoreError};

/// An in-memory [`ConfigStore`] with injectable failures.
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<StoredConfig>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicU32,
    writes: AtomicU32,
}

impl MemoryStore {
    /// Creates a store in the first-run state (empty record).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a record, as if a previous process
    /// had written it.
    pub fn with_record(record: StoredConfig) -> Self {
        Self {
            record: Mutex::new(record),
            ..Self::default()
        }
    }

    /// Makes subsequent reads fail with [`StoreError::Unavailable`].
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Makes subsequent writes fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Returns a copy of the currently stored record.
    pub fn snapshot(&self) -> StoredConfig {
        self.record.lock().expect("lock poisoned").clone()
    }

    /// Number of `read` calls so far, failed ones included.
    pub fn read_count(&self) -> u32 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `write` calls so far, failed ones included.
    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn read(&self) -> Result<StoredConfig, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("injected read failure".to_string()));
        }
        Ok(self.snapshot())
    }

    async fn write(&self, record: &StoredConfig) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable(
                "injected write failure".to_string(),
            ));
        }
        *self.record.lock().expect("lock poisoned") = record.clone();
        Ok(())
    }
}
