//! CREC configuration coordinator — entry point.
//!
//! This binary is the background half of the CREC new-tab extension: it
//! owns the feed configuration (endpoint URL + access token), persists it,
//! answers `get-config` / `save-config` requests from the new-tab and
//! options surfaces, and warms the feed cache after every successful load.
//!
//! # Usage
//!
//! ```text
//! crec-coordinator [OPTIONS]
//!
//! Options:
//!   --bind  <ADDR>  IP address to bind the listener to [default: 127.0.0.1]
//!   --port  <PORT>  Listener port [default: 8710]
//!   --store <PATH>  Config store file [default: platform config directory]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable     | Default                       | Description            |
//! |--------------|-------------------------------|------------------------|
//! | `CREC_BIND`  | `127.0.0.1`                   | Listener bind address  |
//! | `CREC_PORT`  | `8710`                        | Listener port          |
//! | `CREC_STORE` | platform config dir           | Config store file path |
//!
//! Log filtering is controlled by `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crec_coordinator::application::{ConfigState, MessageRouter};
use crec_coordinator::domain::CoordinatorConfig;
use crec_coordinator::infrastructure::storage::default_store_path;
use crec_coordinator::infrastructure::{run_server, FileStore, HttpPrefetcher};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// CREC new-tab configuration coordinator.
///
/// Owns the feed configuration for the CREC extension surfaces: persists
/// it, serves it over a local WebSocket, and prefetches the configured feed.
#[derive(Debug, Parser)]
#[command(
    name = "crec-coordinator",
    about = "Feed configuration authority for the CREC new-tab extension",
    version
)]
struct Cli {
    /// IP address to bind the surface-facing listener to.
    ///
    /// Surfaces run on the same machine, so the loopback default is right
    /// for almost every deployment.
    #[arg(long, default_value = "127.0.0.1", env = "CREC_BIND")]
    bind: String,

    /// TCP port for the surface-facing listener.
    #[arg(long, default_value_t = 8710, env = "CREC_PORT")]
    port: u16,

    /// Path of the configuration store file.
    ///
    /// When omitted, the platform config directory is used
    /// (`~/.config/crec/config.toml` on Linux).
    #[arg(long, env = "CREC_STORE")]
    store: Option<PathBuf>,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`CoordinatorConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not a valid IP address.
    fn into_coordinator_config(self) -> anyhow::Result<CoordinatorConfig> {
        let ws_bind_addr: SocketAddr = format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address: '{}:{}'", self.bind, self.port))?;

        Ok(CoordinatorConfig {
            ws_bind_addr,
            store_path: self.store,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `RUST_LOG` controls filtering; absent or invalid falls back to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.into_coordinator_config()?;

    let store_path = match &config.store_path {
        Some(path) => path.clone(),
        None => default_store_path().context("could not determine platform config directory")?,
    };

    info!(
        "CREC configuration coordinator starting — ws={}, store={}",
        config.ws_bind_addr,
        store_path.display()
    );

    let store = Arc::new(FileStore::new(store_path));
    let prefetcher = Arc::new(HttpPrefetcher::new());
    let state = Arc::new(ConfigState::new(store, prefetcher));

    // Hydrate from the store. A failed read is non-fatal: the coordinator
    // keeps answering with defaults until a later save or restart succeeds.
    let _ = state.load().await;

    let router = Arc::new(MessageRouter::new(Arc::clone(&state)));

    // Ctrl+C clears the shared flag; the accept loop checks it every 200 ms.
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C — initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(config, router, running).await?;

    info!("CREC configuration coordinator stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
