//! # crec-core
//!
//! Shared library for the CREC new-tab extension backend containing the feed
//! configuration model and the surface messaging protocol.
//!
//! This crate is used by the background coordinator and by any surface-side
//! tooling that speaks the coordinator's protocol. It has zero dependencies
//! on sockets, file systems, or async runtimes.
//!
//! # Module map
//!
//! - **`domain`** – Pure configuration types: the effective in-memory
//!   [`ContentConfig`] (always fully populated), the [`StoredConfig`]
//!   persistence record (both keys optional), and the merge rules between
//!   them.
//!
//! - **`protocol`** – The JSON request/response "language" surfaces use to
//!   talk to the coordinator, plus the codec that turns text frames into
//!   typed messages and back.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `crec_core::ContentConfig` instead of `crec_core::domain::config::ContentConfig`.
pub use domain::config::{ContentConfig, StoredConfig, DEFAULT_ENDPOINT, DEFAULT_TOKEN};
pub use protocol::codec::{decode_request, encode_response, ProtocolError};
pub use protocol::messages::{ConfigResponse, SurfaceRequest};
