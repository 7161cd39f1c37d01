//! # opsdash-core
//!
//! Configuration model and rules for a fixed seven-panel, three-column
//! operations dashboard (camera feeds, weather widgets, live streams).
//!
//! The crate has no I/O.  It turns whatever a store or an operator hands over
//! into a complete, renderable [`DashboardConfig`]:
//!
//! ```text
//! stored / imported JSON ──► validate_overlay ──► apply_overlay(defaults) ──► DashboardConfig
//! editor text           ──► EditorForm::commit ──────────────────────────► DashboardConfig
//! ```
//!
//! Column widths are normalized with [`normalize_columns`], pasted panel
//! content with [`normalize_content`].

pub mod domain;

pub use domain::config::{DashboardConfig, PanelId, Panels, UnknownPanelId, FALLBACK_TITLE};
pub use domain::editor::EditorForm;
pub use domain::hints::{config_hints, panel_hint, PanelHint};
pub use domain::merge::{
    apply_overlay, merge, validate_overlay, FieldRejection, Overlay, OverlayValidation,
    RejectionReason,
};
pub use domain::normalize::{coerce_number, normalize_columns, normalize_content};
pub use domain::presets::{ColumnPreset, UnknownPreset};
