//! TOML settings for the console itself.
//!
//! These are *not* the dashboard configuration.  They tell the console where
//! to keep the dashboard document and how chatty to be:
//!
//! ```toml
//! [console]
//! log_level = "debug"
//!
//! [storage]
//! dir = "/srv/opsdash"
//! ```
//!
//! The file lives in the platform config directory:
//! - Windows:  `%APPDATA%\OpsDash\settings.toml`
//! - Linux:    `~/.config/opsdash/settings.toml`
//! - macOS:    `~/Library/Application Support/OpsDash/settings.toml`
//!
//! Every field has a serde default, so an absent file, an empty file and a
//! file with only some sections all load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Settings schema ───────────────────────────────────────────────────────────

/// Top-level console settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub console: ConsoleSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Behaviour of the console process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleSettings {
    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the dashboard document is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Storage directory.  Defaults to `storage/` next to the settings file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Resolves the storage directory, using the platform default when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoPlatformConfigDir`] when no directory is
    /// configured and the platform default cannot be determined.
    pub fn storage_dir(&self) -> Result<PathBuf, SettingsError> {
        match &self.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(settings_dir()?.join("storage")),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for console files.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn settings_dir() -> Result<PathBuf, SettingsError> {
    platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)
}

/// Resolves the full path to the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsError> {
    Ok(settings_dir()?.join("settings.toml"))
}

/// Loads settings from `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Loads settings from the platform default location.
///
/// # Errors
///
/// See [`settings_file_path`] and [`load_settings_from`].
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(&settings_file_path()?)
}

/// Resolves the platform config base directory plus the `opsdash` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("OpsDash"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("opsdash"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("OpsDash")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_default_log_level_is_info() {
        assert_eq!(Settings::default().console.log_level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings: Settings = toml::from_str("").expect("empty settings parse");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_fields() {
        // Arrange
        let toml_str = r#"
[storage]
dir = "/srv/opsdash"
"#;

        // Act
        let settings: Settings = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(settings.storage.dir, Some(PathBuf::from("/srv/opsdash")));
        assert_eq!(settings.console.log_level, "info");
    }

    #[test]
    fn test_configured_storage_dir_wins() {
        let settings = Settings {
            storage: StorageSettings {
                dir: Some(PathBuf::from("/data/dash")),
            },
            ..Settings::default()
        };
        assert_eq!(settings.storage_dir().unwrap(), PathBuf::from("/data/dash"));
    }

    #[test]
    fn test_default_storage_dir_is_under_settings_dir() {
        if let Ok(dir) = settings_dir() {
            assert_eq!(Settings::default().storage_dir().unwrap(), dir.join("storage"));
        }
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        // Arrange
        let settings = Settings {
            console: ConsoleSettings {
                log_level: "debug".to_string(),
            },
            storage: StorageSettings {
                dir: Some(PathBuf::from("/tmp/x")),
            },
        };

        // Act
        let text = toml::to_string_pretty(&settings).expect("serialize");
        let restored: Settings = toml::from_str(&text).expect("deserialize");

        // Assert
        assert_eq!(settings, restored);
    }

    #[test]
    fn test_load_settings_from_missing_file_returns_defaults() {
        let path = std::env::temp_dir()
            .join(format!("opsdash_test_{}", Uuid::new_v4()))
            .join("settings.toml");
        assert_eq!(load_settings_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_settings_from_malformed_file_is_parse_error() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("opsdash_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        // Act
        let result = load_settings_from(&path);

        // Assert
        assert!(matches!(result, Err(SettingsError::Parse(_))));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_settings_file_path_ends_with_settings_toml() {
        if let Ok(path) = settings_file_path() {
            assert!(path.ends_with("settings.toml"), "got {path:?}");
        }
    }
}
