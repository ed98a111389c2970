//! Codec between raw JSON text frames and typed protocol messages.
//!
//! The transport delivers frames as UTF-8 text. This module is the single
//! place where frames are parsed and rendered, so the rest of the codebase
//! only ever handles [`SurfaceRequest`] and [`ConfigResponse`] values.
//!
//! Decoding is deliberately strict about the messages it *does* recognize
//! (a `save-config` without its payload is malformed) and deliberately
//! incurious about everything else: an unknown `kind`, a missing `kind`, or
//! a non-object frame all come back as [`ProtocolError::Unrecognized`], and
//! the caller decides whether that is worth a log line. On a shared message
//! bus such frames are usually addressed to some other listener.

use thiserror::Error;

use crate::protocol::messages::{ConfigResponse, SurfaceRequest};

/// Errors produced by the frame codec.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not a request the coordinator understands.
    #[error("unrecognized request frame: {0}")]
    Unrecognized(String),

    /// A response value could not be rendered to JSON.
    #[error("failed to encode response frame: {0}")]
    Encode(String),
}

/// Parses a raw text frame into a typed request.
///
/// # Errors
///
/// Returns [`ProtocolError::Unrecognized`] for anything that is not a
/// well-formed protocol request, including frames with an unknown `kind`.
pub fn decode_request(raw: &str) -> Result<SurfaceRequest, ProtocolError> {
    serde_json::from_str(raw).map_err(|e| ProtocolError::Unrecognized(e.to_string()))
}

/// Renders a response to the JSON text frame sent back to the surface.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails; with the
/// current response shape this does not happen, but the codec keeps the
/// error path rather than panicking in the transport.
pub fn encode_response(response: &ConfigResponse) -> Result<String, ProtocolError> {
    serde_json::to_string(response).map_err(|e| ProtocolError::Encode(e.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
