//! crec-coordinator library crate.
//!
//! The coordinator is the background-resident authority for the CREC
//! new-tab extension's feed configuration. Extension surfaces (the new-tab
//! page and the options page) never touch the store or the network
//! themselves; they send `get-config` / `save-config` requests to this
//! process and receive point-in-time configuration snapshots back.
//!
//! # Architecture
//!
//! ```text
//! Surfaces (JSON over WebSocket)
//!         ↕
//! [crec-coordinator]
//!   ├── domain/           CoordinatorConfig (bind address, store path)
//!   ├── application/      ConfigState (load/save/current + lifecycle),
//!   │                     MessageRouter (request dispatch)
//!   └── infrastructure/
//!         ├── storage/    FileStore (TOML record on disk) + MemoryStore mock
//!         ├── prefetch/   HttpPrefetcher (fire-and-forget GET) + recording mock
//!         └── ws_server/  WebSocket accept loop (tokio-tungstenite)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` holds the state machine and dispatch logic; it depends on
//!   the `ConfigStore` and `FeedPrefetcher` traits it defines, never on a
//!   concrete store or HTTP client.
//! - `infrastructure` implements those traits and owns every socket, file,
//!   and spawned task.

/// Domain layer: coordinator runtime settings.
pub mod domain;

/// Application layer: configuration state machine and request dispatch.
pub mod application;

/// Infrastructure layer: file store, HTTP prefetch, WebSocket transport.
pub mod infrastructure;
