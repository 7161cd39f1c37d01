//! Overlaying untrusted documents onto a trusted configuration.
//!
//! A stored or imported document may be partial, stale, hand-edited or simply
//! wrong.  Merging happens in two steps:
//!
//! 1. [`validate_overlay`] inspects the raw JSON and keeps only the fields
//!    whose type matches the schema.  The result is an [`Overlay`] plus a list
//!    of [`FieldRejection`]s describing what was dropped and why.
//! 2. [`apply_overlay`] copies the accepted fields onto a base configuration
//!    and returns a new value.
//!
//! [`merge`] runs both.  Rejections are logged at `debug` level and otherwise
//! ignored: a bad field silently keeps its base value and the result is always
//! a complete [`DashboardConfig`].
//!
//! # Field rules
//!
//! | Field                | Accepted when                       | Applied as                    |
//! |----------------------|-------------------------------------|-------------------------------|
//! | `name`               | string (empty allowed)              | replaces base                 |
//! | `refreshIntervalSec` | number                              | replaces base, not clamped    |
//! | `columnsPct`         | array of exactly 3 elements         | each element coerced, wholesale |
//! | `panels`             | object                              | per known id, strings only    |
//!
//! No range checks happen here.  Clamping and column normalization are the
//! editor's job (see [`super::editor`]).

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use super::config::{DashboardConfig, PanelId};
use super::normalize::coerce_number;

/// Why an incoming field was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The whole document is not a JSON object.
    NotAnObject,
    /// The field exists but has the wrong JSON type.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// `columnsPct` is an array of the wrong length.
    WrongLength { expected: usize, found: usize },
    /// A key inside `panels` that is not one of the seven panel ids.
    UnknownKey,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::NotAnObject => f.write_str("document is not an object"),
            RejectionReason::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            RejectionReason::WrongLength { expected, found } => {
                write!(f, "expected {expected} elements, found {found}")
            }
            RejectionReason::UnknownKey => f.write_str("unknown key"),
        }
    }
}

/// A single field dropped during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRejection {
    /// Dotted path of the field, e.g. `panels.leftTop`.  Empty for the root.
    pub path: String,
    pub reason: RejectionReason,
}

impl fmt::Display for FieldRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

/// Fields accepted from an incoming document.
///
/// `None` means "keep the base value", whether the field was absent or
/// rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub name: Option<String>,
    pub refresh_interval_sec: Option<f64>,
    pub columns_pct: Option<[f64; 3]>,
    /// Accepted panel contents, in display order.
    pub panels: Vec<(PanelId, String)>,
}

impl Overlay {
    /// Returns `true` when nothing would change on apply.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.refresh_interval_sec.is_none()
            && self.columns_pct.is_none()
            && self.panels.is_empty()
    }
}

/// Outcome of [`validate_overlay`].
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayValidation {
    /// Every field present in the document was accepted.
    Clean(Overlay),
    /// Some fields were dropped; the overlay holds what survived.
    Partial {
        overlay: Overlay,
        rejections: Vec<FieldRejection>,
    },
}

impl OverlayValidation {
    /// The accepted fields, regardless of rejections.
    pub fn overlay(&self) -> &Overlay {
        match self {
            OverlayValidation::Clean(overlay) | OverlayValidation::Partial { overlay, .. } => {
                overlay
            }
        }
    }

    /// Dropped fields; empty for [`OverlayValidation::Clean`].
    pub fn rejections(&self) -> &[FieldRejection] {
        match self {
            OverlayValidation::Clean(_) => &[],
            OverlayValidation::Partial { rejections, .. } => rejections,
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(path: impl Into<String>, expected: &'static str, found: &Value) -> FieldRejection {
    FieldRejection {
        path: path.into(),
        reason: RejectionReason::WrongType {
            expected,
            found: type_name(found),
        },
    }
}

fn validate_panels(
    panels: &Map<String, Value>,
    accepted: &mut Vec<(PanelId, String)>,
    rejections: &mut Vec<FieldRejection>,
) {
    for id in PanelId::ALL {
        match panels.get(id.as_str()) {
            None => {}
            Some(Value::String(content)) => accepted.push((id, content.clone())),
            Some(other) => rejections.push(wrong_type(format!("panels.{id}"), "string", other)),
        }
    }
    for key in panels.keys() {
        if key.parse::<PanelId>().is_err() {
            rejections.push(FieldRejection {
                path: format!("panels.{key}"),
                reason: RejectionReason::UnknownKey,
            });
        }
    }
}

/// Checks every known field of `incoming` against the schema.
///
/// Absent fields are neither accepted nor rejected.  Unknown top-level keys
/// are ignored without a rejection; unknown keys inside `panels` are reported
/// so an operator importing a typo'd panel id can be told about it.
pub fn validate_overlay(incoming: &Value) -> OverlayValidation {
    let Some(doc) = incoming.as_object() else {
        return OverlayValidation::Partial {
            overlay: Overlay::default(),
            rejections: vec![FieldRejection {
                path: String::new(),
                reason: RejectionReason::NotAnObject,
            }],
        };
    };

    let mut overlay = Overlay::default();
    let mut rejections = Vec::new();

    match doc.get("name") {
        None => {}
        Some(Value::String(name)) => overlay.name = Some(name.clone()),
        Some(other) => rejections.push(wrong_type("name", "string", other)),
    }

    match doc.get("refreshIntervalSec") {
        None => {}
        Some(Value::Number(n)) => {
            overlay.refresh_interval_sec = n.as_f64().filter(|secs| secs.is_finite());
        }
        Some(other) => rejections.push(wrong_type("refreshIntervalSec", "number", other)),
    }

    match doc.get("columnsPct") {
        None => {}
        Some(Value::Array(cols)) if cols.len() == 3 => {
            overlay.columns_pct = Some([
                coerce_number(&cols[0]),
                coerce_number(&cols[1]),
                coerce_number(&cols[2]),
            ]);
        }
        Some(Value::Array(cols)) => rejections.push(FieldRejection {
            path: "columnsPct".to_string(),
            reason: RejectionReason::WrongLength {
                expected: 3,
                found: cols.len(),
            },
        }),
        Some(other) => rejections.push(wrong_type("columnsPct", "array", other)),
    }

    match doc.get("panels") {
        None => {}
        Some(Value::Object(panels)) => {
            validate_panels(panels, &mut overlay.panels, &mut rejections);
        }
        Some(other) => rejections.push(wrong_type("panels", "object", other)),
    }

    if rejections.is_empty() {
        OverlayValidation::Clean(overlay)
    } else {
        OverlayValidation::Partial {
            overlay,
            rejections,
        }
    }
}

/// Returns `base` with every accepted field of `overlay` applied.
pub fn apply_overlay(base: &DashboardConfig, overlay: &Overlay) -> DashboardConfig {
    let mut out = base.clone();
    if let Some(name) = &overlay.name {
        out.name = name.clone();
    }
    if let Some(secs) = overlay.refresh_interval_sec {
        out.refresh_interval_sec = secs;
    }
    if let Some(cols) = overlay.columns_pct {
        out.columns_pct = cols;
    }
    for (id, content) in &overlay.panels {
        out.panels.set(*id, content.clone());
    }
    out
}

/// Merges an untrusted document onto `base`.
///
/// `base` is left untouched; the merged configuration is returned.  The
/// result always contains every field and all seven panels.
pub fn merge(base: &DashboardConfig, incoming: &Value) -> DashboardConfig {
    let validation = validate_overlay(incoming);
    for rejection in validation.rejections() {
        debug!("ignoring incoming config field: {rejection}");
    }
    apply_overlay(base, validation.overlay())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
