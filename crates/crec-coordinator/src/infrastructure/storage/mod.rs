//! Storage infrastructure: persistence adapters for the config store seam.
//!
//! The application layer only knows the `ConfigStore` trait. This module
//! provides the two implementations:
//!
//! - [`FileStore`] – the production adapter, a TOML record in the platform
//!   config directory.
//! - [`MemoryStore`] – a mock that keeps the record in memory and can be
//!   told to fail, for tests that drive the coordinator without a disk.

pub mod file;
pub mod mock;

pub use file::{default_store_path, FileStore};
pub use mock::MemoryStore;
