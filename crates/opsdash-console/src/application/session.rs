//! DashboardSession: the single owner of the live configuration.
//!
//! A session holds three things:
//!
//! - the [`ConfigStore`] it persists through,
//! - the **current** configuration, which the renderer reads,
//! - an optional **draft** ([`EditorForm`]) while an edit is in progress.
//!
//! The current configuration is only ever replaced wholesale: on open, commit,
//! reset and import.  Callers get read-only access through
//! [`DashboardSession::current`].
//!
//! # Edit lifecycle
//!
//! ```text
//!            begin_edit                 commit_edit
//!  Viewing ─────────────► Editing ───────────────────► Viewing (draft promoted, saved)
//!                            │
//!                            └──── discard_edit ─────► Viewing (draft dropped)
//! ```
//!
//! Reset and import work in either state.  When a draft is open they refresh
//! it from the new current configuration, discarding uncommitted edits.
//!
//! Every operation that persists saves *before* replacing the current
//! configuration, so a failed write leaves the session exactly as it was.

use opsdash_core::{ColumnPreset, DashboardConfig, EditorForm};
use thiserror::Error;
use tracing::{debug, info};

use super::transfer::{export_document, import_document, ImportError};
use super::config_store::{ConfigStore, KeyValueStorage, StoreError};

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A draft operation was requested while no edit is open.
    #[error("no edit in progress")]
    NotEditing,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("failed to export config: {0}")]
    Export(#[source] serde_json::Error),
}

/// The live dashboard configuration and its optional draft.
pub struct DashboardSession<S> {
    store: ConfigStore<S>,
    current: DashboardConfig,
    draft: Option<EditorForm>,
}

impl<S: KeyValueStorage> DashboardSession<S> {
    /// Opens a session, loading the stored configuration (or the defaults).
    pub fn open(store: ConfigStore<S>) -> Self {
        let current = store.load();
        debug!("session opened with '{}'", current.display_title());
        Self {
            store,
            current,
            draft: None,
        }
    }

    /// The configuration the renderer should show.
    pub fn current(&self) -> &DashboardConfig {
        &self.current
    }

    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Opens a draft copied from the current configuration.
    ///
    /// An already open draft is replaced.
    pub fn begin_edit(&mut self) -> &mut EditorForm {
        self.draft.insert(EditorForm::from_config(&self.current))
    }

    /// The open draft.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotEditing`] when no draft is open.
    pub fn draft_mut(&mut self) -> Result<&mut EditorForm, SessionError> {
        self.draft.as_mut().ok_or(SessionError::NotEditing)
    }

    /// Applies a column preset to the open draft.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotEditing`] when no draft is open.
    pub fn apply_preset(&mut self, preset: ColumnPreset) -> Result<(), SessionError> {
        self.draft_mut()?.apply_preset(preset);
        Ok(())
    }

    /// Commits the draft: normalizes it, saves it and makes it current.
    ///
    /// On a failed save the draft stays open and the current configuration is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotEditing`] when no draft is open, or
    /// [`SessionError::Store`] when the write fails.
    pub fn commit_edit(&mut self) -> Result<&DashboardConfig, SessionError> {
        let committed = self.draft.as_ref().ok_or(SessionError::NotEditing)?.commit();
        self.store.save(&committed)?;
        self.current = committed;
        self.draft = None;
        info!("committed dashboard edit");
        Ok(&self.current)
    }

    /// Drops the draft without saving.  Does nothing when no draft is open.
    pub fn discard_edit(&mut self) {
        if self.draft.take().is_some() {
            debug!("discarded dashboard draft");
        }
    }

    /// Restores and saves the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the write fails.
    pub fn reset(&mut self) -> Result<&DashboardConfig, SessionError> {
        self.replace(DashboardConfig::default())?;
        info!("reset dashboard config to defaults");
        Ok(&self.current)
    }

    /// Serializes the current configuration for copying elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Export`] if serialization fails.
    pub fn export(&self) -> Result<String, SessionError> {
        export_document(&self.current).map_err(SessionError::Export)
    }

    /// Imports a (possibly partial) document over the defaults and saves it.
    ///
    /// Nothing changes when the text does not parse.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Import`] for unparseable text and
    /// [`SessionError::Store`] when the write fails.
    pub fn import(&mut self, text: &str) -> Result<&DashboardConfig, SessionError> {
        let imported = import_document(text)?;
        self.replace(imported)?;
        info!("imported dashboard config '{}'", self.current.display_title());
        Ok(&self.current)
    }

    fn replace(&mut self, cfg: DashboardConfig) -> Result<(), StoreError> {
        self.store.save(&cfg)?;
        self.current = cfg;
        if let Some(draft) = self.draft.as_mut() {
            *draft = EditorForm::from_config(&self.current);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
