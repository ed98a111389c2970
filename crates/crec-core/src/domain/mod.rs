//! Domain layer for crec-core.
//!
//! Pure business-logic types with no dependencies on I/O, networking, or
//! external frameworks. Everything here can be exercised in tests without a
//! store, a socket, or a runtime.

pub mod config;

pub use config::{ContentConfig, StoredConfig};
