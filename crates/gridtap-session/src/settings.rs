//! User-facing session settings.

use serde::{Deserialize, Serialize};

/// Presentation settings that survive restarts.
///
/// These only shape the render projection; none of them affect board,
/// annotation, or history state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Show every cell's candidate grid even with no digit highlighted.
    pub show_candidates: bool,
    /// While a digit is highlighted, black out cells that cannot take it
    /// (other final values, and cells where it is marked impossible).
    pub blackout_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_candidates: true,
            blackout_mode: false,
        }
    }
}
