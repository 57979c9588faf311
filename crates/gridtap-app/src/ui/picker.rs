//! The number picker row.
//!
//! The picker is a raw-input surface, not a set of click buttons: holds and
//! swipes matter, so this module only paints and reports hit rects. The app
//! translates pointer events against them.

use eframe::egui::{Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};
use gridtap_core::Digit;
use gridtap_session::BoardView;

use crate::ui::digit_color;

/// Hit rects reported back for pointer translation.
pub struct PickerRects {
    /// One rect per digit button, in digit order.
    pub digits: [Rect; 9],
    /// The erase button.
    pub erase: Rect,
}

/// Paints the picker and returns its hit rects.
pub fn show(ui: &mut Ui, view: &BoardView, highlight: Option<Digit>) -> PickerRects {
    let avail = ui.available_size();
    let padding = 4.0;
    let button = f32::min((avail.x - 9.0 * padding) / 10.0, avail.y);

    let (row_rect, _response) = ui.allocate_exact_size(
        Vec2::new(avail.x, button),
        Sense::hover(),
    );
    let painter = ui.painter();
    let visuals = &ui.style().visuals;

    let mut digits = [Rect::NOTHING; 9];
    for digit in Digit::ALL {
        let i = f32::from(digit.index());
        let min = row_rect.min + Vec2::new(i * (button + padding), 0.0);
        let rect = Rect::from_min_size(min, Vec2::splat(button));
        digits[usize::from(digit.index())] = rect;

        let disabled = view.disabled_digits.contains(digit);
        let color = if disabled {
            digit_color(digit).gamma_multiply(0.25)
        } else {
            digit_color(digit)
        };
        let fill = if highlight == Some(digit) {
            digit_color(digit).gamma_multiply(0.35)
        } else {
            visuals.faint_bg_color
        };
        painter.circle_filled(rect.center(), button / 2.0, fill);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            digit.as_str(),
            FontId::proportional(button * 0.55),
            color,
        );
        if highlight == Some(digit) {
            painter.circle_stroke(
                rect.center(),
                button / 2.0,
                Stroke::new(2.0, digit_color(digit)),
            );
        }
    }

    let erase_min = row_rect.min + Vec2::new(9.0 * (button + padding), 0.0);
    let erase = Rect::from_min_size(erase_min, Vec2::splat(button));
    painter.rect_filled(
        erase,
        4.0,
        Color32::from_rgb(0xe5, 0x48, 0x57).gamma_multiply(0.25),
    );
    painter.text(
        erase.center(),
        Align2::CENTER_CENTER,
        "⌫",
        FontId::proportional(button * 0.5),
        visuals.strong_text_color(),
    );
    painter.rect_stroke(
        erase,
        4.0,
        Stroke::new(1.0, visuals.widgets.inactive.fg_stroke.color),
        StrokeKind::Inside,
    );

    PickerRects { digits, erase }
}
