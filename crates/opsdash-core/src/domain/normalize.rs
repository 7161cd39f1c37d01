//! Normalization rules for editor-supplied and stored values.
//!
//! Two values need more than a type check before the renderer can use them:
//!
//! - **Column widths** must be three integers in `[5, 90]` that add up to 100.
//!   [`normalize_columns`] rounds, clamps and rescales arbitrary input.
//! - **Panel content** may be pasted as a full `<iframe>` snippet, as a bare
//!   URL, or as arbitrary markup.  [`normalize_content`] wraps bare URLs and
//!   leaves everything else alone.
//!
//! # Loose number coercion
//!
//! Editor fields and stored arrays may contain strings, booleans or `null`
//! where a number is expected.  [`coerce_number`] and [`parse_number`] turn
//! those into finite `f64` values with the same permissive rules everywhere:
//! anything that is not recognisably a number becomes `0`.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Smallest width a single column may take, in percent.
pub const MIN_COLUMN_PCT: i32 = 5;

/// Largest width a single column may take, in percent.
pub const MAX_COLUMN_PCT: i32 = 90;

const TOTAL_PCT: i32 = 100;

// ── Number coercion ───────────────────────────────────────────────────────────

/// Parses editor text as a number.
///
/// Blank text is `Some(0.0)`.  Text that is not a finite decimal number is
/// `None`; callers decide what a non-number falls back to.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerces an arbitrary JSON value to a finite number.
///
/// | Input                     | Result          |
/// |---------------------------|-----------------|
/// | number                    | itself          |
/// | `true` / `false`          | `1` / `0`       |
/// | numeric string            | parsed value    |
/// | one-element array         | its element     |
/// | anything else             | `0`             |
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        Value::String(s) => parse_number(s).unwrap_or(0.0),
        Value::Array(items) => match items.as_slice() {
            [only @ (Value::Number(_) | Value::String(_) | Value::Array(_))] => coerce_number(only),
            _ => 0.0,
        },
        Value::Bool(false) | Value::Null | Value::Object(_) => 0.0,
    }
}

/// Rounds half-way cases towards positive infinity (`2.5 → 3`, `-2.5 → -2`).
pub(crate) fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

// ── Columns ───────────────────────────────────────────────────────────────────

/// Normalizes three column widths so they can be applied as percentages.
///
/// 1. Each value is rounded and clamped to `[5, 90]`.
/// 2. A triple that already sums to 100 is returned as-is.
/// 3. Otherwise the values are scaled towards 100; the first two are rounded
///    and the third takes whatever is left.
/// 4. The third is clamped again.  If that breaks the total, the whole
///    residual goes to the middle column, which is clamped too.
///
/// The first column is never corrected in step 4 and the final sum is not
/// re-checked.  For lopsided input (e.g. `[90, 5, 90]`) the scaled first or
/// middle value can land below 5, and when the middle clamp cannot absorb the
/// residual the total drifts from 100.  Renderers depend on these exact
/// numbers, so the behaviour is kept as-is.
pub fn normalize_columns(cols: [f64; 3]) -> [i32; 3] {
    let clamp_pct = |x: f64| -> i32 {
        let finite = if x.is_finite() { x } else { 0.0 };
        round_half_up(finite).clamp(f64::from(MIN_COLUMN_PCT), f64::from(MAX_COLUMN_PCT)) as i32
    };

    let [a, b, c] = cols.map(clamp_pct);
    let sum = a + b + c;
    if sum == TOTAL_PCT {
        return [a, b, c];
    }

    let scale = f64::from(TOTAL_PCT) / f64::from(sum);
    let a = round_half_up(f64::from(a) * scale) as i32;
    let mut b = round_half_up(f64::from(b) * scale) as i32;
    let c = (TOTAL_PCT - a - b).clamp(MIN_COLUMN_PCT, MAX_COLUMN_PCT);

    let total = a + b + c;
    if total != TOTAL_PCT {
        b = (b + (TOTAL_PCT - total)).clamp(MIN_COLUMN_PCT, MAX_COLUMN_PCT);
    }
    [a, b, c]
}

// ── Content ───────────────────────────────────────────────────────────────────

fn bare_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^https?://\S+$").expect("bare URL pattern is a valid regex")
    })
}

/// Returns `true` when `text` already looks like a complete embed snippet.
fn looks_like_iframe(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("<iframe") && lower.contains("src=")
}

/// Wraps `url` in a minimal lazy-loading iframe.
pub fn iframe_for_url(url: &str) -> String {
    format!(r#"<iframe src="{url}" loading="lazy"></iframe>"#)
}

/// Decides how pasted panel content is stored.
///
/// - blank input → `""`
/// - an `<iframe ... src=...>` snippet → trimmed, unchanged
/// - a bare `http(s)://` URL → wrapped by [`iframe_for_url`]
/// - anything else → trimmed, unchanged
///
/// Content is never sanitized.  Panels are authored by the dashboard operator
/// only and are rendered verbatim.
pub fn normalize_content(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if looks_like_iframe(trimmed) {
        return trimmed.to_string();
    }
    if bare_url_pattern().is_match(trimmed) {
        return iframe_for_url(trimmed);
    }
    trimmed.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
