//! Dashboard configuration domain entity.
//!
//! The dashboard is a fixed grid: three columns holding seven panels.  The
//! left column stacks three camera/feed slots, the centre column two, and the
//! right column two.  Only the *content* of each slot and the relative column
//! widths are configurable.
//!
//! # Document shape
//!
//! The configuration is persisted and exported as a JSON object:
//!
//! ```json
//! {
//!   "name": "Weather & Operations Dashboard",
//!   "refreshIntervalSec": 600,
//!   "columnsPct": [35, 40, 25],
//!   "panels": { "leftTop": "<iframe ...>", "...": "..." }
//! }
//! ```
//!
//! There is no version field.  Older or hand-edited documents are upgraded by
//! merging them over [`DashboardConfig::default`] (see [`super::merge`]).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalize::normalize_columns;

/// Title shown when the configured name is empty.
pub const FALLBACK_TITLE: &str = "Operations Dashboard";

/// Interval used when the stored refresh interval is zero.
pub const DEFAULT_REFRESH_INTERVAL_SEC: f64 = 600.0;

/// Lower bound of the auto-reload interval, in seconds.
pub const MIN_REFRESH_INTERVAL_SEC: f64 = 30.0;

/// Upper bound of the auto-reload interval accepted from the editor, in seconds.
pub const MAX_REFRESH_INTERVAL_SEC: f64 = 3600.0;

/// Column widths of the built-in layout.
pub const DEFAULT_COLUMNS_PCT: [f64; 3] = [35.0, 40.0, 25.0];

const DEFAULT_NAME: &str = "Weather & Operations Dashboard";

// ── Panel identifiers ─────────────────────────────────────────────────────────

/// One of the seven fixed layout slots.
///
/// The declaration order is the display order used by editors and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelId {
    LeftTop,
    LeftMiddle,
    LeftBottom,
    CenterTop,
    CenterBottom,
    RightTop,
    RightBottom,
}

/// Error returned when a string does not name a known panel.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown panel id: {0}")]
pub struct UnknownPanelId(pub String);

impl PanelId {
    /// Every panel, in display order.
    pub const ALL: [PanelId; 7] = [
        PanelId::LeftTop,
        PanelId::LeftMiddle,
        PanelId::LeftBottom,
        PanelId::CenterTop,
        PanelId::CenterBottom,
        PanelId::RightTop,
        PanelId::RightBottom,
    ];

    /// The key used for this panel in the JSON document.
    pub fn as_str(self) -> &'static str {
        match self {
            PanelId::LeftTop => "leftTop",
            PanelId::LeftMiddle => "leftMiddle",
            PanelId::LeftBottom => "leftBottom",
            PanelId::CenterTop => "centerTop",
            PanelId::CenterBottom => "centerBottom",
            PanelId::RightTop => "rightTop",
            PanelId::RightBottom => "rightBottom",
        }
    }

    /// Human-readable label shown next to the panel's editor field.
    pub fn label(self) -> &'static str {
        match self {
            PanelId::LeftTop => "Left 1 (Camera/Feed)",
            PanelId::LeftMiddle => "Left 2 (Camera/Feed)",
            PanelId::LeftBottom => "Left 3 (Camera/Feed)",
            PanelId::CenterTop => "Center Top",
            PanelId::CenterBottom => "Center Bottom",
            PanelId::RightTop => "Right Top",
            PanelId::RightBottom => "Right Bottom",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelId {
    type Err = UnknownPanelId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownPanelId(s.to_string()))
    }
}

// ── Panel contents ────────────────────────────────────────────────────────────

/// Content of all seven panels.
///
/// One named field per [`PanelId`] so a `Panels` value can never be missing a
/// slot or carry an extra one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panels {
    pub left_top: String,
    pub left_middle: String,
    pub left_bottom: String,
    pub center_top: String,
    pub center_bottom: String,
    pub right_top: String,
    pub right_bottom: String,
}

impl Panels {
    /// Returns the content of `id`.
    pub fn get(&self, id: PanelId) -> &str {
        match id {
            PanelId::LeftTop => &self.left_top,
            PanelId::LeftMiddle => &self.left_middle,
            PanelId::LeftBottom => &self.left_bottom,
            PanelId::CenterTop => &self.center_top,
            PanelId::CenterBottom => &self.center_bottom,
            PanelId::RightTop => &self.right_top,
            PanelId::RightBottom => &self.right_bottom,
        }
    }

    /// Replaces the content of `id`.
    pub fn set(&mut self, id: PanelId, content: impl Into<String>) {
        let slot = match id {
            PanelId::LeftTop => &mut self.left_top,
            PanelId::LeftMiddle => &mut self.left_middle,
            PanelId::LeftBottom => &mut self.left_bottom,
            PanelId::CenterTop => &mut self.center_top,
            PanelId::CenterBottom => &mut self.center_bottom,
            PanelId::RightTop => &mut self.right_top,
            PanelId::RightBottom => &mut self.right_bottom,
        };
        *slot = content.into();
    }

    /// Iterates `(id, content)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &str)> + '_ {
        PanelId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            left_top: r#"<iframe src="https://webcam.io/webcams/MpbQgP?embed=true" loading="lazy"></iframe>"#.to_string(),
            left_middle: r#"<iframe src="https://player.twitch.tv/?channel=5newswdtv&parent=dlukekopp.github.io" allowfullscreen="true" scrolling="no"></iframe>"#.to_string(),
            left_bottom: r#"<iframe src="https://vtc1.roadsummary.com/rtplive/CAM001/playlist.m3u8" loading="lazy"></iframe>"#.to_string(),
            center_top: r#"<iframe src="https://embed.ventusky.com/?p=38.98;-81.21;7&l=radar&m=hrrr" loading="lazy"></iframe>"#.to_string(),
            center_bottom: r#"<iframe src="https://www.weather.gov/rlx/briefing" loading="lazy"></iframe>"#.to_string(),
            right_top: r#"<iframe src="https://www.weather.gov/rlx/" loading="lazy"></iframe>"#.to_string(),
            right_bottom: r#"<iframe src="https://www.broadcastify.com/webPlayer/40500" loading="lazy"></iframe>"#.to_string(),
        }
    }
}

// ── Root configuration ────────────────────────────────────────────────────────

/// The complete dashboard configuration.
///
/// Numeric fields are `f64` because a stored document may carry any finite
/// JSON number; they are only rounded and clamped when an editor commits or
/// when the layout is derived (see [`DashboardConfig::column_layout`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Display name shown in the header and the window title.
    pub name: String,
    /// Auto-reload cadence in seconds.
    #[serde(with = "super::number")]
    pub refresh_interval_sec: f64,
    /// Relative widths of the left, centre and right columns.
    #[serde(with = "super::number::triple")]
    pub columns_pct: [f64; 3],
    /// Embeddable content for every panel.
    pub panels: Panels,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            refresh_interval_sec: DEFAULT_REFRESH_INTERVAL_SEC,
            columns_pct: DEFAULT_COLUMNS_PCT,
            panels: Panels::default(),
        }
    }
}

impl DashboardConfig {
    /// Title to render; falls back to [`FALLBACK_TITLE`] when the name is empty.
    pub fn display_title(&self) -> &str {
        if self.name.is_empty() {
            FALLBACK_TITLE
        } else {
            &self.name
        }
    }

    /// The reload interval external timers should use.
    ///
    /// A zero interval means "unset" and yields the default; anything else is
    /// raised to at least [`MIN_REFRESH_INTERVAL_SEC`].  No upper bound is
    /// applied here because merge trusts stored values until they are re-saved
    /// through the editor.
    pub fn effective_refresh_interval(&self) -> Duration {
        let raw = if self.refresh_interval_sec == 0.0 || !self.refresh_interval_sec.is_finite() {
            DEFAULT_REFRESH_INTERVAL_SEC
        } else {
            self.refresh_interval_sec
        };
        Duration::try_from_secs_f64(raw.max(MIN_REFRESH_INTERVAL_SEC)).unwrap_or(Duration::MAX)
    }

    /// Normalized column percentages, as applied by the renderer.
    pub fn column_layout(&self) -> [i32; 3] {
        normalize_columns(self.columns_pct)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_expected_scalars() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.name, "Weather & Operations Dashboard");
        assert_eq!(cfg.refresh_interval_sec, 600.0);
        assert_eq!(cfg.columns_pct, [35.0, 40.0, 25.0]);
    }

    #[test]
    fn test_default_panels_are_all_iframes() {
        let panels = Panels::default();
        for (id, content) in panels.iter() {
            assert!(
                content.starts_with("<iframe src=\"https://"),
                "default content of {id} must be an iframe, got {content}"
            );
        }
    }

    #[test]
    fn test_panel_id_round_trips_through_str() {
        for id in PanelId::ALL {
            assert_eq!(id.as_str().parse::<PanelId>(), Ok(id));
        }
    }

    #[test]
    fn test_panel_id_rejects_unknown_name() {
        // Arrange / Act
        let result = "leftCenter".parse::<PanelId>();

        // Assert
        assert_eq!(result, Err(UnknownPanelId("leftCenter".to_string())));
    }

    #[test]
    fn test_panel_id_serializes_as_camel_case() {
        let json = serde_json::to_string(&PanelId::CenterBottom).unwrap();
        assert_eq!(json, "\"centerBottom\"");
    }

    #[test]
    fn test_panels_set_then_get_replaces_only_that_slot() {
        // Arrange
        let mut panels = Panels::default();
        let before = panels.clone();

        // Act
        panels.set(PanelId::RightTop, "hello");

        // Assert
        assert_eq!(panels.get(PanelId::RightTop), "hello");
        for id in PanelId::ALL.into_iter().filter(|id| *id != PanelId::RightTop) {
            assert_eq!(panels.get(id), before.get(id));
        }
    }

    #[test]
    fn test_panels_iter_follows_display_order() {
        let ids: Vec<PanelId> = Panels::default().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, PanelId::ALL.to_vec());
    }

    #[test]
    fn test_config_serializes_integral_numbers_without_fraction() {
        // Arrange
        let cfg = DashboardConfig::default();

        // Act
        let json = serde_json::to_string(&cfg).unwrap();

        // Assert
        assert!(json.contains("\"refreshIntervalSec\":600,"), "got {json}");
        assert!(json.contains("\"columnsPct\":[35,40,25]"), "got {json}");
    }

    #[test]
    fn test_config_serializes_fractional_numbers_as_floats() {
        let mut cfg = DashboardConfig::default();
        cfg.refresh_interval_sec = 45.5;
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"refreshIntervalSec\":45.5"), "got {json}");
    }

    #[test]
    fn test_config_json_round_trip() {
        // Arrange
        let mut cfg = DashboardConfig::default();
        cfg.name = "Night shift".to_string();
        cfg.columns_pct = [30.0, 45.0, 25.0];
        cfg.panels.set(PanelId::LeftTop, "<p>offline</p>");

        // Act
        let json = serde_json::to_string(&cfg).unwrap();
        let restored: DashboardConfig = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_display_title_falls_back_when_name_empty() {
        let mut cfg = DashboardConfig::default();
        cfg.name.clear();
        assert_eq!(cfg.display_title(), "Operations Dashboard");
    }

    #[test]
    fn test_display_title_uses_name_when_present() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.display_title(), "Weather & Operations Dashboard");
    }

    #[test]
    fn test_effective_refresh_interval_uses_default_for_zero() {
        let mut cfg = DashboardConfig::default();
        cfg.refresh_interval_sec = 0.0;
        assert_eq!(cfg.effective_refresh_interval(), Duration::from_secs(600));
    }

    #[test]
    fn test_effective_refresh_interval_raises_small_values_to_minimum() {
        let mut cfg = DashboardConfig::default();
        cfg.refresh_interval_sec = 5.0;
        assert_eq!(cfg.effective_refresh_interval(), Duration::from_secs(30));

        cfg.refresh_interval_sec = -120.0;
        assert_eq!(cfg.effective_refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_effective_refresh_interval_keeps_large_stored_values() {
        let mut cfg = DashboardConfig::default();
        cfg.refresh_interval_sec = 7200.0;
        assert_eq!(cfg.effective_refresh_interval(), Duration::from_secs(7200));
    }

    #[test]
    fn test_effective_refresh_interval_saturates_for_huge_values() {
        // Arrange: merge accepts any finite number unclamped
        let cfg = crate::domain::merge::merge(
            &DashboardConfig::default(),
            &serde_json::json!({"refreshIntervalSec": 1e300}),
        );

        // Act / Assert
        assert_eq!(cfg.effective_refresh_interval(), Duration::MAX);
    }

    #[test]
    fn test_column_layout_normalizes_stored_values() {
        let mut cfg = DashboardConfig::default();
        cfg.columns_pct = [50.0, 50.0, 50.0];
        let layout = cfg.column_layout();
        assert_eq!(layout.iter().sum::<i32>(), 100);
    }
}
