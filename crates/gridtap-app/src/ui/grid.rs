//! Painting the 9×9 grid from the session's projection.

use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};
use gridtap_core::{CellIndex, Digit};
use gridtap_session::{BoardView, CellFlags, CellView};

use crate::ui::digit_color;

const CELL_BORDER_RATIO: f32 = 0.03;
const THICK_BORDER_RATIO: f32 = 3.0;

/// Colors derived from the current egui theme.
struct GridPalette {
    bg_default: Color32,
    bg_selected: Color32,
    bg_target: Color32,
    bg_input_mode: Color32,
    bg_highlight_peer: Color32,
    bg_blackout: Color32,
    bg_animating: Color32,
    border: Color32,
    border_selected: Color32,
    text_given: Color32,
    text_wrong: Color32,
    anti_bg: Color32,
    anti_text: Color32,
}

impl GridPalette {
    fn from_ui(ui: &Ui) -> Self {
        let visuals = &ui.style().visuals;
        Self {
            bg_default: visuals.extreme_bg_color,
            bg_selected: visuals.selection.bg_fill,
            bg_target: visuals.widgets.active.bg_fill,
            bg_input_mode: visuals.warn_fg_color.gamma_multiply(0.3),
            bg_highlight_peer: visuals.faint_bg_color,
            bg_blackout: Color32::BLACK,
            bg_animating: Color32::from_rgb(0xf5, 0xc5, 0x42).gamma_multiply(0.55),
            border: visuals.widgets.inactive.fg_stroke.color,
            border_selected: visuals.selection.stroke.color,
            text_given: visuals.strong_text_color(),
            text_wrong: visuals.error_fg_color,
            anti_bg: Color32::from_black_alpha(200),
            anti_text: Color32::from_rgb(0xe5, 0x48, 0x57),
        }
    }
}

/// Allocates the grid, paints the projection, and returns the grid rect for
/// pointer hit testing.
pub fn show(ui: &mut Ui, view: &BoardView) -> Rect {
    let side = ui.available_size().min_elem();
    let (rect, _response) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());

    let palette = GridPalette::from_ui(ui);
    let cell_size = cell_size(rect);
    let painter = ui.painter();

    for (index, cell) in view.iter() {
        let cell_rect = cell_rect(rect, index);
        paint_cell_background(painter, &palette, cell_rect, cell, view.highlight);
        paint_cell_content(painter, &palette, cell_rect, cell);
        paint_cell_border(painter, &palette, cell_rect, cell, cell_size);
    }

    paint_box_borders(painter, &palette, rect, cell_size);
    rect
}

/// Maps a pointer position inside the grid rect to a cell index.
#[must_use]
pub fn cell_at_pos(rect: Rect, pos: Pos2) -> Option<CellIndex> {
    if !rect.contains(pos) {
        return None;
    }
    let cell = cell_size(rect);
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let col = (((pos.x - rect.min.x) / cell).floor() as u8).min(8);
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let row = (((pos.y - rect.min.y) / cell).floor() as u8).min(8);
    Some(CellIndex::from_row_col(row, col))
}

fn cell_size(rect: Rect) -> f32 {
    rect.width() / 9.0
}

fn cell_rect(rect: Rect, index: CellIndex) -> Rect {
    let cell = cell_size(rect);
    let min = rect.min
        + Vec2::new(
            cell * f32::from(index.col()),
            cell * f32::from(index.row()),
        );
    Rect::from_min_size(min, Vec2::splat(cell))
}

fn paint_cell_background(
    painter: &Painter,
    palette: &GridPalette,
    rect: Rect,
    cell: &CellView,
    highlight: Option<Digit>,
) {
    let fill = if cell.flags.contains(CellFlags::BLACKED_OUT) {
        palette.bg_blackout
    } else if cell.flags.contains(CellFlags::SELECTED) {
        palette.bg_selected
    } else if cell.flags.contains(CellFlags::TAPPED_TARGET) {
        palette.bg_target
    } else if cell.flags.contains(CellFlags::INPUT_MODE) {
        palette.bg_input_mode
    } else if cell.flags.contains(CellFlags::HIGHLIGHT_VALUE) {
        highlight.map_or(palette.bg_default, |digit| {
            digit_color(digit).gamma_multiply(0.45)
        })
    } else if cell
        .flags
        .intersects(CellFlags::HIGHLIGHT_PEER | CellFlags::HIGHLIGHT_ANTI)
    {
        highlight.map_or(palette.bg_highlight_peer, |digit| {
            digit_color(digit).gamma_multiply(0.15)
        })
    } else {
        palette.bg_default
    };
    painter.rect_filled(rect, 0.0, fill);

    if cell.flags.contains(CellFlags::ANIMATING) {
        painter.rect_filled(rect, 0.0, palette.bg_animating);
    }
}

fn paint_cell_content(painter: &Painter, palette: &GridPalette, rect: Rect, cell: &CellView) {
    if cell.flags.contains(CellFlags::BLACKED_OUT) && !cell.is_given {
        return;
    }

    if let Some(digit) = cell.value {
        let color = if cell.flags.contains(CellFlags::WRONG_VALUE) {
            palette.text_wrong
        } else if cell.is_given {
            palette.text_given
        } else {
            digit_color(digit)
        };
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            digit.as_str(),
            FontId::proportional(rect.height() * 0.72),
            color,
        );
        return;
    }

    if cell.shown_candidates.is_empty() && cell.shown_anti.is_empty() {
        return;
    }

    // 3×3 mini-grid of candidate marks; anti-candidates get a dark disc.
    let mini_w = rect.width() / 3.0;
    let mini_h = rect.height() / 3.0;
    let font = FontId::proportional(mini_h * 0.8);
    for digit in Digit::ALL {
        let idx = digit.index();
        let center = rect.min
            + Vec2::new(
                (f32::from(idx % 3) + 0.5) * mini_w,
                (f32::from(idx / 3) + 0.5) * mini_h,
            );
        if cell.shown_anti.contains(digit) {
            painter.circle_filled(center, mini_h * 0.45, palette.anti_bg);
            painter.text(center, Align2::CENTER_CENTER, digit.as_str(), font.clone(), palette.anti_text);
        } else if cell.shown_candidates.contains(digit) {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                digit.as_str(),
                font.clone(),
                digit_color(digit),
            );
        }
    }
}

fn paint_cell_border(
    painter: &Painter,
    palette: &GridPalette,
    rect: Rect,
    cell: &CellView,
    cell_size: f32,
) {
    let base = f32::max(cell_size * CELL_BORDER_RATIO, 1.0);
    let (width, color) = if cell
        .flags
        .intersects(CellFlags::SELECTED | CellFlags::TAPPED_TARGET | CellFlags::INPUT_MODE)
    {
        (base * 2.0, palette.border_selected)
    } else {
        (base, palette.border)
    };
    painter.rect_stroke(rect, 0.0, Stroke::new(width, color), StrokeKind::Inside);
}

fn paint_box_borders(painter: &Painter, palette: &GridPalette, rect: Rect, cell_size: f32) {
    let base = f32::max(cell_size * CELL_BORDER_RATIO, 1.0);
    let stroke = Stroke::new(base * THICK_BORDER_RATIO, palette.border);

    painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Inside);
    for i in [3.0, 6.0] {
        let x = rect.min.x + cell_size * i;
        painter.line_segment(
            [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
            stroke,
        );
        let y = rect.min.y + cell_size * i;
        painter.line_segment(
            [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
            stroke,
        );
    }
}
