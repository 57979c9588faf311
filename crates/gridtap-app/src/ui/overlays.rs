//! The radial digit menu and the candidate pill.
//!
//! Both are floating chrome over the grid: the session suspends grid input
//! while one is open, and their item clicks funnel back into the session's
//! command handlers.

use std::f32::consts::TAU;

use eframe::egui::{
    Area, Button, Color32, Context, Id, Order, Pos2, RichText, Vec2,
};
use gridtap_core::Digit;
use gridtap_session::{Overlay, PillChoice, Session};

use crate::ui::digit_color;

const RADIAL_RADIUS: f32 = 76.0;
const RADIAL_ITEM: f32 = 40.0;

/// Draws the active overlay, if any, and routes its clicks into `session`.
pub fn show(ctx: &Context, session: &mut Session, now: f64) {
    match session.overlay() {
        Overlay::None => {}
        Overlay::Radial { anchor, .. } => show_radial(ctx, session, anchor, now),
        Overlay::Pill { digit, anchor } => show_pill(ctx, session, digit, anchor),
    }
}

fn show_radial(ctx: &Context, session: &mut Session, anchor: (f32, f32), now: f64) {
    let center = Pos2::new(anchor.0, anchor.1);
    // Ten items on a circle: the eraser at twelve o'clock, digits clockwise
    // after it.
    let slot = |i: f32| {
        let angle = i * TAU / 10.0 - TAU / 4.0;
        let item_center = center + Vec2::new(angle.cos(), angle.sin()) * RADIAL_RADIUS;
        eframe::egui::Rect::from_center_size(item_center, Vec2::splat(RADIAL_ITEM))
    };

    Area::new(Id::new("radial_menu"))
        .order(Order::Foreground)
        .fixed_pos(center - Vec2::splat(RADIAL_RADIUS + RADIAL_ITEM))
        .show(ctx, |ui| {
            let erase = Button::new(RichText::new("⌫").size(RADIAL_ITEM * 0.45))
                .min_size(Vec2::splat(RADIAL_ITEM))
                .fill(Color32::from_rgb(0xe5, 0x48, 0x57).gamma_multiply(0.5));
            if ui.put(slot(0.0), erase).clicked() {
                session.radial_choose_erase();
                return;
            }

            for digit in Digit::ALL {
                let button = Button::new(
                    RichText::new(digit.as_str())
                        .size(RADIAL_ITEM * 0.5)
                        .color(digit_color(digit)),
                )
                .min_size(Vec2::splat(RADIAL_ITEM));
                if ui.put(slot(f32::from(digit.value())), button).clicked() {
                    session.radial_choose_digit(digit, now);
                    return;
                }
            }
        });
}

fn show_pill(ctx: &Context, session: &mut Session, digit: Digit, anchor: (f32, f32)) {
    Area::new(Id::new("candidate_pill"))
        .order(Order::Foreground)
        .fixed_pos(Pos2::new(anchor.0 - 70.0, anchor.1 - 56.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let candidate = Button::new(
                    RichText::new(format!("{digit}?"))
                        .size(18.0)
                        .color(digit_color(digit)),
                );
                if ui.add(candidate).on_hover_text("Mark as candidate").clicked() {
                    session.pill_choose(PillChoice::Candidate);
                    return;
                }
                let anti = Button::new(
                    RichText::new(format!("{digit}✕"))
                        .size(18.0)
                        .color(Color32::from_rgb(0xe5, 0x48, 0x57)),
                );
                if ui.add(anti).on_hover_text("Rule out").clicked() {
                    session.pill_choose(PillChoice::Anti);
                }
            });
        });
}
