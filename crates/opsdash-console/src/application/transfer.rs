//! Import and export of configuration documents.
//!
//! Export produces pretty-printed JSON meant to be copied between machines.
//! Import accepts a full or partial document and always merges it over the
//! built-in defaults, never over the live configuration, so the same text
//! imports to the same result no matter what was configured before.

use opsdash_core::{merge, DashboardConfig};
use serde_json::Value;
use thiserror::Error;

/// Message shown to the operator when pasted text is not JSON.
pub const IMPORT_PARSE_HINT: &str =
    "That didn't parse as valid JSON. Double-check formatting and try again.";

/// Error type for importing a configuration document.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The text is not JSON at all.  Field-level problems are not errors.
    #[error("{hint}", hint = IMPORT_PARSE_HINT)]
    Parse(#[source] serde_json::Error),
}

/// Serializes `cfg` as human-readable JSON (two-space indentation).
///
/// # Errors
///
/// Returns the serializer error if the configuration cannot be encoded.
pub fn export_document(cfg: &DashboardConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(cfg)
}

/// Parses `text` and merges it over [`DashboardConfig::default`].
///
/// # Errors
///
/// Returns [`ImportError::Parse`] when `text` is not valid JSON.
pub fn import_document(text: &str) -> Result<DashboardConfig, ImportError> {
    let parsed: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    Ok(merge(&DashboardConfig::default(), &parsed))
}
