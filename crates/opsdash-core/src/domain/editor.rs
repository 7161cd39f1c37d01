//! Editor form model: raw field text and the rules applied on commit.
//!
//! The editor drawer itself is owned by the rendering layer.  What it edits is
//! an [`EditorForm`]: the text currently in each input, exactly as typed.
//! Nothing is validated while the operator types; all normalization happens in
//! [`EditorForm::commit`].
//!
//! # Commit rules
//!
//! | Field            | Rule                                                          |
//! |------------------|---------------------------------------------------------------|
//! | name             | trimmed; empty becomes `"Operations Dashboard"`               |
//! | refresh interval | parsed; `0` or non-numeric becomes 600; clamped to `[30, 3600]` |
//! | columns          | parsed (non-numeric is 0) then [`normalize_columns`]          |
//! | panels           | each through [`normalize_content`]                            |

use super::config::{
    DashboardConfig, PanelId, Panels, DEFAULT_REFRESH_INTERVAL_SEC, FALLBACK_TITLE,
    MAX_REFRESH_INTERVAL_SEC, MIN_REFRESH_INTERVAL_SEC,
};
use super::hints::{panel_hint, PanelHint};
use super::normalize::{normalize_columns, normalize_content, parse_number};
use super::presets::ColumnPreset;

/// Raw editor input for every configurable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub name: String,
    pub refresh_interval: String,
    pub columns: [String; 3],
    pub panels: Panels,
}

/// Formats a stored number the way an input field shows it (`600`, `45.5`).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl EditorForm {
    /// Fills the form from a configuration.
    ///
    /// Columns are shown normalized so the operator starts from a valid split.
    pub fn from_config(cfg: &DashboardConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            refresh_interval: format_number(cfg.refresh_interval_sec),
            columns: normalize_columns(cfg.columns_pct).map(|pct| pct.to_string()),
            panels: cfg.panels.clone(),
        }
    }

    /// Overwrites the column inputs with a preset.
    pub fn apply_preset(&mut self, preset: ColumnPreset) {
        self.columns = preset.columns().map(|pct| pct.to_string());
    }

    /// Replaces the raw text of one panel input.
    pub fn set_panel(&mut self, id: PanelId, text: impl Into<String>) {
        self.panels.set(id, text);
    }

    /// Hint for the panel input as currently typed.
    pub fn panel_hint(&self, id: PanelId) -> Option<PanelHint> {
        panel_hint(self.panels.get(id))
    }

    /// Produces the configuration this form describes.
    pub fn commit(&self) -> DashboardConfig {
        let name = match self.name.trim() {
            "" => FALLBACK_TITLE.to_string(),
            trimmed => trimmed.to_string(),
        };

        let refresh = match parse_number(&self.refresh_interval) {
            Some(secs) if secs != 0.0 => secs,
            _ => DEFAULT_REFRESH_INTERVAL_SEC,
        }
        .clamp(MIN_REFRESH_INTERVAL_SEC, MAX_REFRESH_INTERVAL_SEC);

        let column = |i: usize| parse_number(&self.columns[i]).unwrap_or(0.0);
        let columns = normalize_columns([column(0), column(1), column(2)]);

        let mut panels = self.panels.clone();
        for id in PanelId::ALL {
            panels.set(id, normalize_content(self.panels.get(id)));
        }

        DashboardConfig {
            name,
            refresh_interval_sec: refresh,
            columns_pct: columns.map(f64::from),
            panels,
        }
    }
}
