//! JSON message types for the surface-facing configuration protocol.
//!
//! Extension surfaces (the new-tab page and the options page) talk to the
//! background coordinator in JSON text frames. Every request is an object
//! with a `"kind"` field that identifies the operation; all other fields are
//! flattened into the same object. Serde's `#[serde(tag = "kind")]`
//! attribute handles the discriminant automatically.
//!
//! # Wire shapes
//!
//! ```json
//! {"kind":"get-config"}
//! {"kind":"save-config","endpoint":"https://x.test/feed","token":"abc"}
//! ```
//!
//! Responses are flat snapshots with no discriminant, because both request
//! kinds answer with the same shape:
//!
//! ```json
//! {"endpoint":"http://localhost:8080/crec/content","token":"Mozilla"}
//! ```
//!
//! The protocol is permissive: a frame whose `kind` is not listed here is
//! not an error, it is simply not addressed to the coordinator and receives
//! no reply.

use serde::{Deserialize, Serialize};

use crate::domain::config::ContentConfig;

// ── Requests ──────────────────────────────────────────────────────────────────

/// All requests a surface can address to the coordinator.
///
/// # Serde representation
///
/// ```json
/// {"kind":"get-config"}
/// {"kind":"save-config","endpoint":"…","token":"…"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SurfaceRequest {
    /// Asks for the current configuration snapshot. No side effects.
    #[serde(rename = "get-config")]
    GetConfig,

    /// Replaces the stored configuration with the supplied values.
    ///
    /// Both values are opaque strings; the coordinator performs no URL or
    /// token validation. The reply is delivered only after the durable
    /// write and the follow-up reload have completed.
    #[serde(rename = "save-config")]
    SaveConfig {
        /// New content endpoint URL.
        endpoint: String,
        /// New access token.
        token: String,
    },
}

impl SurfaceRequest {
    /// Returns a short kind string for a request variant.
    ///
    /// Used in log messages so that token values never leak into logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SurfaceRequest::GetConfig => "get-config",
            SurfaceRequest::SaveConfig { .. } => "save-config",
        }
    }
}

// ── Responses ─────────────────────────────────────────────────────────────────

/// The configuration snapshot returned for both request kinds.
///
/// A point-in-time copy: later saves do not mutate an already delivered
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Content endpoint URL at the time of the request.
    pub endpoint: String,
    /// Access token at the time of the request.
    pub token: String,
}

impl From<ContentConfig> for ConfigResponse {
    fn from(config: ContentConfig) -> Self {
        Self {
            endpoint: config.endpoint,
            token: config.token,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
