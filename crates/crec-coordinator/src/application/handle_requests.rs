//! Request dispatch: the single entry point surfaces reach the coordinator
//! through.
//!
//! The router accepts raw text frames, decodes them with the shared protocol
//! codec, and answers the two request kinds it owns. Everything else on the
//! bus is *not ours*: the outcome [`DispatchOutcome::NotHandled`] tells the
//! transport to send no reply frame at all, which is distinct from "handled
//! with an empty result" and never treated as an error.
//!
//! # Ordering guarantee
//!
//! `save-config` is answered only after the full write-then-reload cycle has
//! finished, so a surface that awaits the reply is guaranteed that a
//! subsequent `get-config` (its own or any other surface's) observes the
//! newly saved values.

use std::sync::Arc;

use crec_core::{decode_request, ConfigResponse, SurfaceRequest};
use tracing::debug;

use crate::application::config_state::ConfigState;

// ── Outcome ───────────────────────────────────────────────────────────────────

/// What the transport should do with a dispatched frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The request was addressed to the coordinator; send this snapshot back.
    Replied(ConfigResponse),
    /// The frame was not a coordinator request; send nothing.
    NotHandled,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Dispatches surface requests against the shared [`ConfigState`].
pub struct MessageRouter {
    state: Arc<ConfigState>,
}

impl MessageRouter {
    pub fn new(state: Arc<ConfigState>) -> Self {
        Self { state }
    }

    /// Decodes and dispatches one raw text frame.
    ///
    /// Frames that are not recognizable coordinator requests (unknown
    /// `kind`, missing payload, non-JSON) come back as
    /// [`DispatchOutcome::NotHandled`]; on a shared bus they may belong to
    /// another listener, so they rate a debug line, nothing more.
    pub async fn dispatch_frame(&self, raw: &str) -> DispatchOutcome {
        match decode_request(raw) {
            Ok(request) => {
                debug!("surface request: {}", request.kind_name());
                self.dispatch(request).await
            }
            Err(e) => {
                debug!("ignoring frame: {e}");
                DispatchOutcome::NotHandled
            }
        }
    }

    /// Dispatches an already decoded request.
    pub async fn dispatch(&self, request: SurfaceRequest) -> DispatchOutcome {
        match request {
            SurfaceRequest::GetConfig => {
                // No side effects; always answerable, defaults included.
                DispatchOutcome::Replied(ConfigResponse::from(self.state.current()))
            }

            SurfaceRequest::SaveConfig { endpoint, token } => {
                // A failed write leaves the snapshot at the last loaded
                // values; the reply below then echoes those stale values
                // instead of the submitted ones. The failure itself has
                // already been logged inside save().
                let _ = self.state.save(endpoint, token).await;
                DispatchOutcome::Replied(ConfigResponse::from(self.state.current()))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
