//! Feed configuration types and merge rules.
//!
//! Two representations of the same pair of values exist on purpose:
//!
//! - [`ContentConfig`] is the *effective* configuration: both fields are
//!   always non-empty, falling back to documented defaults. This is what the
//!   coordinator hands to surfaces and to the prefetch trigger.
//! - [`StoredConfig`] is the *persistence record*: both keys are optional
//!   because a first-run store is empty, and an upgraded or hand-edited
//!   record may carry only one of them.
//!
//! The merge rules in [`ContentConfig::merged_with`] define how a stored
//! record is folded over the current effective configuration, and
//! [`StoredConfig::is_complete`] tells the caller whether the record on disk
//! needs to be healed (written back fully populated).

use serde::{Deserialize, Serialize};

/// Content endpoint used until the store provides one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/crec/content";

/// Access token used until the store provides one.
pub const DEFAULT_TOKEN: &str = "Mozilla";

// ── Effective configuration ───────────────────────────────────────────────────

/// The effective feed configuration.
///
/// Invariant: both fields are non-empty. Construction paths are
/// [`ContentConfig::default`] and [`ContentConfig::merged_with`], and both
/// uphold it; a stored field that is absent or empty never overwrites the
/// current value.
///
/// # Example
///
/// ```rust
/// use crec_core::ContentConfig;
///
/// let config = ContentConfig::default();
/// assert_eq!(config.endpoint, "http://localhost:8080/crec/content");
/// assert_eq!(config.token, "Mozilla");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// URL of the remote content endpoint serving the JSON feed.
    pub endpoint: String,
    /// Opaque access token passed as the `t` query parameter.
    pub token: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: DEFAULT_TOKEN.to_string(),
        }
    }
}

impl ContentConfig {
    /// Returns the full feed URL, `{endpoint}?t={token}`.
    ///
    /// Both values are opaque strings; no URL validation or escaping is
    /// applied, matching the contract the content server expects.
    pub fn feed_url(&self) -> String {
        format!("{}?t={}", self.endpoint, self.token)
    }

    /// Folds a stored record over this configuration.
    ///
    /// A stored field overwrites the current value only when it is present
    /// *and* non-empty; otherwise the current value (default or previously
    /// loaded) is kept. The result is always fully populated.
    pub fn merged_with(&self, stored: &StoredConfig) -> ContentConfig {
        ContentConfig {
            endpoint: pick(&stored.endpoint, &self.endpoint),
            token: pick(&stored.token, &self.token),
        }
    }
}

/// Chooses the stored value when usable, the current value otherwise.
fn pick(stored: &Option<String>, current: &str) -> String {
    match stored {
        Some(value) if !value.is_empty() => value.clone(),
        _ => current.to_string(),
    }
}

// ── Persistence record ────────────────────────────────────────────────────────

/// The configuration record as it exists in the persistent store.
///
/// Both keys are optional on read: a first-run store has neither, and a
/// partially populated record is legal. Keys that are `None` are omitted on
/// write, so a healed record always round-trips to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Stored endpoint URL, absent until first written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Stored access token, absent until first written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl StoredConfig {
    /// Returns `true` when both fields are present and non-empty.
    ///
    /// An incomplete record is the signal for write-back healing: the
    /// coordinator persists the effective configuration so that subsequent
    /// loads always find a fully populated record.
    pub fn is_complete(&self) -> bool {
        usable(&self.endpoint) && usable(&self.token)
    }
}

fn usable(field: &Option<String>) -> bool {
    matches!(field, Some(value) if !value.is_empty())
}

impl From<&ContentConfig> for StoredConfig {
    /// Builds the fully populated record for an effective configuration.
    fn from(config: &ContentConfig) -> Self {
        Self {
            endpoint: Some(config.endpoint.clone()),
            token: Some(config.token.clone()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
