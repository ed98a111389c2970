//! Infrastructure layer for crec-coordinator.
//!
//! Everything that touches a file, a socket, or a spawned task lives here:
//!
//! - `storage` – the file-backed implementation of the `ConfigStore` trait
//!   plus an in-memory mock for tests.
//! - `prefetch` – the HTTP implementation of the `FeedPrefetcher` trait
//!   plus a recording mock.
//! - `ws_server` – the WebSocket accept loop surfaces connect to.
//!
//! Protocol decoding and the configuration state machine do NOT belong
//! here; they live in `crec-core` and the application layer.

pub mod prefetch;
pub mod storage;
pub mod ws_server;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use prefetch::HttpPrefetcher;
pub use storage::FileStore;
pub use ws_server::{run_server, run_with_listener};
