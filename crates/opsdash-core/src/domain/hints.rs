//! Advisory hints for panel content.
//!
//! Hints never block a save.  They point out content that is known to render
//! as an error page once embedded.

use std::fmt;

use super::config::{DashboardConfig, PanelId};

/// A known problem with a panel's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHint {
    /// Twitch refuses to play embeds whose URL lacks the `parent=` parameter.
    TwitchParentMissing,
}

impl PanelHint {
    pub fn message(self) -> &'static str {
        match self {
            PanelHint::TwitchParentMissing => {
                "Twitch note: add parent=YOUR_DOMAIN (e.g., dlukekopp.github.io) or the embed will be blocked."
            }
        }
    }
}

impl fmt::Display for PanelHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Returns the hint for `content`, if any.
pub fn panel_hint(content: &str) -> Option<PanelHint> {
    if content.contains("player.twitch.tv") && !content.contains("parent=") {
        Some(PanelHint::TwitchParentMissing)
    } else {
        None
    }
}

/// Collects hints for every panel of `cfg`, in display order.
pub fn config_hints(cfg: &DashboardConfig) -> Vec<(PanelId, PanelHint)> {
    cfg.panels
        .iter()
        .filter_map(|(id, content)| panel_hint(content).map(|hint| (id, hint)))
        .collect()
}
