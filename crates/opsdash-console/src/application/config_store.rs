//! Persistence of the dashboard configuration document.
//!
//! The dashboard keeps exactly one document under one key, the way a browser
//! page would use `localStorage`.  [`KeyValueStorage`] is that interface; the
//! adapters implementing it live in the infrastructure layer.
//!
//! The whole configuration is stored as one compact JSON string under
//! [`STORAGE_KEY`].  Reading is forgiving, writing is not:
//!
//! - [`ConfigStore::load`] never fails.  A missing, unreadable or corrupt
//!   document yields the built-in defaults; a readable one is merged over the
//!   defaults so stale or partial documents still produce a full configuration.
//! - [`ConfigStore::save`] replaces the stored document and reports every
//!   failure to the caller.

use std::path::PathBuf;

use opsdash_core::{merge, DashboardConfig};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for key/value storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the value would exceed the storage quota.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded { needed: usize, quota: usize },
}

/// Minimal string store keyed by name.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage {
    /// Returns the stored value, or `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ── Config store ──────────────────────────────────────────────────────────────

/// Key under which the configuration document is stored.
pub const STORAGE_KEY: &str = "opsDashboardConfig.v1";

/// Error type for saving the configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The configuration could not be serialized to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The underlying storage refused the write.
    #[error("failed to write config: {0}")]
    Storage(#[from] StorageError),
}

/// Loads and saves the configuration document through a [`KeyValueStorage`].
#[derive(Debug)]
pub struct ConfigStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ConfigStore<S> {
    /// Creates a store using the standard [`STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    /// Creates a store that keeps its document under `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the stored configuration, falling back to defaults.
    pub fn load(&self) -> DashboardConfig {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no stored config under '{}', using defaults", self.key);
                return DashboardConfig::default();
            }
            Err(e) => {
                warn!("could not read stored config, using defaults: {e}");
                return DashboardConfig::default();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(parsed) => merge(&DashboardConfig::default(), &parsed),
            Err(e) => {
                warn!("stored config is not valid JSON, using defaults: {e}");
                DashboardConfig::default()
            }
        }
    }

    /// Writes `cfg`, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] when the storage rejects the write and
    /// [`StoreError::Serialize`] if the configuration cannot be encoded.
    pub fn save(&mut self, cfg: &DashboardConfig) -> Result<(), StoreError> {
        let content = serde_json::to_string(cfg)?;
        self.storage.set_item(&self.key, &content)?;
        info!("saved dashboard config '{}'", cfg.display_title());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
