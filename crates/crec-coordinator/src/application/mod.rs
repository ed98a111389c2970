//! Application layer use cases for the coordinator.
//!
//! Use cases in this layer orchestrate the domain types to fulfil surface
//! requests. They depend on abstractions (the `ConfigStore` and
//! `FeedPrefetcher` traits) rather than concrete implementations, so the
//! infrastructure can be swapped without changing this code, and contain no
//! sockets, file handles, or HTTP clients of their own.
//!
//! # Sub-modules
//!
//! - **`config_state`** – The authoritative in-memory configuration, its
//!   load/save lifecycle against the persistent store, and the prefetch
//!   trigger that follows every successful load. This is the only state
//!   machine in the repository.
//!
//! - **`handle_requests`** – Dispatches incoming surface requests to the
//!   config state and decides whether a reply frame is owed at all.

pub mod config_state;
pub mod handle_requests;

pub use config_state::{ConfigState, ConfigStore, FeedPrefetcher, Lifecycle, StoreError};
pub use handle_requests::{DispatchOutcome, MessageRouter};
