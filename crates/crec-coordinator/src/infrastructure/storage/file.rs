//! TOML-file-backed configuration store.
//!
//! Reads and writes the [`StoredConfig`] record at the platform-appropriate
//! location:
//!
//! - Windows:  `%APPDATA%\CREC\config.toml`
//! - Linux:    `~/.config/crec/config.toml`
//! - macOS:    `~/Library/Application Support/CREC/config.toml`
//!
//! A missing file is not an error: it is the first-run state, reported as
//! the empty record so the coordinator falls back to defaults and heals the
//! store on its next write-back. All file I/O goes through `tokio::fs`, so
//! a slow disk never stalls the accept loop.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use crec_core::StoredConfig;

use crate::application::config_state::{ConfigStore, StoreError};

// ── Path resolution ───────────────────────────────────────────────────────────

/// Resolves the default store path from the platform config directory.
///
/// Returns `None` when the relevant environment variables are missing
/// (e.g., a stripped container without `HOME`).
pub fn default_store_path() -> Option<PathBuf> {
    platform_config_dir().map(|dir| dir.join("config.toml"))
}

/// Resolves the platform config base directory for CREC.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CREC"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("crec"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/CREC
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CREC")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── File store ────────────────────────────────────────────────────────────────

/// The production [`ConfigStore`]: one TOML record in one file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the given file path.
    ///
    /// The file (and its parent directory) may not exist yet; they are
    /// created on the first write.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigStore for FileStore {
    async fn read(&self) -> Result<StoredConfig, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| StoreError::Malformed(e.to_string()))
            }
            // First run: nothing stored yet.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredConfig::default()),
            Err(e) => Err(StoreError::Unavailable(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write(&self, record: &StoredConfig) -> Result<(), StoreError> {
        // Ensure the directory exists before writing.
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::Unavailable(format!("create {}: {e}", dir.display())))?;
        }

        let content =
            toml::to_string_pretty(record).map_err(|e| StoreError::Malformed(e.to_string()))?;

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::Unavailable(format!("write {}: {e}", self.path.display())))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
