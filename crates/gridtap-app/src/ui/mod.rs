//! UI adapters: painting the session projection and translating raw input.

pub mod grid;
pub mod overlays;
pub mod picker;

use eframe::egui::Color32;
use gridtap_core::Digit;

/// Per-digit accent colors, shared by values, candidates, and the picker.
pub const DIGIT_COLORS: [Color32; 9] = [
    Color32::from_rgb(0xe5, 0x48, 0x57), // 1 red
    Color32::from_rgb(0xf2, 0x8c, 0x28), // 2 orange
    Color32::from_rgb(0xe8, 0xc5, 0x1c), // 3 yellow
    Color32::from_rgb(0x5c, 0xb8, 0x5c), // 4 green
    Color32::from_rgb(0x2f, 0xb5, 0xa8), // 5 teal
    Color32::from_rgb(0x3d, 0x8b, 0xe0), // 6 blue
    Color32::from_rgb(0x6f, 0x6a, 0xe8), // 7 indigo
    Color32::from_rgb(0xb0, 0x62, 0xdd), // 8 purple
    Color32::from_rgb(0xe0, 0x5a, 0xa5), // 9 pink
];

/// Returns the accent color for a digit.
#[must_use]
pub fn digit_color(digit: Digit) -> Color32 {
    DIGIT_COLORS[usize::from(digit.index())]
}
