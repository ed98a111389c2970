//! Prefetch infrastructure: cache-warming adapters for the prefetch seam.
//!
//! - [`HttpPrefetcher`] – the production adapter: one fire-and-forget HTTP
//!   GET per trigger, outcome discarded.
//! - [`RecordingPrefetcher`] – a mock that records the warmed URLs instead
//!   of fetching them.

pub mod http;
pub mod mock;

pub use http::HttpPrefetcher;
pub use mock::RecordingPrefetcher;
