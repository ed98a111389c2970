//! Coordinator runtime settings.
//!
//! [`CoordinatorConfig`] carries the values that describe *this process*:
//! where the surface-facing listener binds and where the persistent config
//! record lives. It is built once at startup from CLI arguments (or from
//! defaults in tests) and then shared read-only.
//!
//! Note the distinction from [`crec_core::ContentConfig`]: that is the
//! *managed* configuration the coordinator serves and persists; this struct
//! never changes after startup.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime settings for the coordinator process.
///
/// # Example
///
/// ```rust
/// use crec_coordinator::domain::CoordinatorConfig;
///
/// // Defaults are suitable for local development:
/// let config = CoordinatorConfig::default();
/// assert_eq!(config.ws_bind_addr.port(), 8710);
/// ```
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// The address and port the surface-facing WebSocket listener binds to.
    ///
    /// Surfaces run on the same machine, so the default binds loopback only.
    pub ws_bind_addr: SocketAddr,

    /// Explicit path of the configuration store file.
    ///
    /// `None` means "resolve the platform config directory at startup"
    /// (`~/.config/crec/config.toml` on Linux and the platform equivalents
    /// elsewhere).
    pub store_path: Option<PathBuf>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            // Compile-time-known valid socket address string.
            ws_bind_addr: "127.0.0.1:8710".parse().unwrap(),
            store_path: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
