//! Named column-width presets offered by the editor.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A canned column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPreset {
    /// Wide left column for the three camera feeds.
    Cameras,
    /// The built-in default split.
    Balanced,
    /// Wide centre column for radar and briefings.
    Weather,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown column preset '{0}' (expected cameras, balanced or weather)")]
pub struct UnknownPreset(pub String);

impl ColumnPreset {
    pub const ALL: [ColumnPreset; 3] = [
        ColumnPreset::Cameras,
        ColumnPreset::Balanced,
        ColumnPreset::Weather,
    ];

    /// Column percentages for this preset; each triple sums to 100.
    pub fn columns(self) -> [i32; 3] {
        match self {
            ColumnPreset::Cameras => [45, 35, 20],
            ColumnPreset::Balanced => [35, 40, 25],
            ColumnPreset::Weather => [28, 50, 22],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnPreset::Cameras => "cameras",
            ColumnPreset::Balanced => "balanced",
            ColumnPreset::Weather => "weather",
        }
    }
}

impl fmt::Display for ColumnPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ColumnPreset::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
