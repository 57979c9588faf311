//! The Gridtap application shell.

use std::time::Duration;

use eframe::{
    App, CreationContext, Frame, Storage,
    egui::{CentralPanel, Context, InputState, Key, Pos2, Rect, RichText, Window},
};
use gridtap_board::{Difficulty, LocalEngine};
use gridtap_core::Digit;
use gridtap_session::{Overlay, PointerModifiers, Session};

use crate::{
    storage::{self, SharedStorage},
    ui::{grid, overlays, picker},
};

pub struct GridtapApp {
    session: Session,
    shared_storage: SharedStorage,
    new_game_open: bool,
    grid_rect: Rect,
    picker_rects: Option<picker::PickerRects>,
    chrome_rect: Rect,
}

impl GridtapApp {
    pub fn new(cc: &CreationContext<'_>) -> Self {
        let shared_storage = SharedStorage::seeded_from(cc.storage);
        let mut session = Session::new(
            Box::new(LocalEngine::new()),
            Box::new(shared_storage.clone()),
        );
        *session.settings_mut() = storage::load_settings(cc.storage);
        session.start_new_puzzle(Difficulty::Easy);

        Self {
            session,
            shared_storage,
            new_game_open: false,
            grid_rect: Rect::NOTHING,
            picker_rects: None,
            chrome_rect: Rect::NOTHING,
        }
    }

    fn handle_keys(&mut self, i: &InputState, now: f64) {
        if i.modifiers.command && i.key_pressed(Key::Z) {
            let _ = self.session.undo();
            return;
        }
        if i.modifiers.command && i.key_pressed(Key::Y) {
            let _ = self.session.redo();
            return;
        }
        if i.key_pressed(Key::Escape) {
            self.session.pointer_down_outside();
            return;
        }
        if i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace) {
            self.session.press_erase();
            return;
        }

        const DIGIT_KEYS: [(Key, Digit); 9] = [
            (Key::Num1, Digit::D1),
            (Key::Num2, Digit::D2),
            (Key::Num3, Digit::D3),
            (Key::Num4, Digit::D4),
            (Key::Num5, Digit::D5),
            (Key::Num6, Digit::D6),
            (Key::Num7, Digit::D7),
            (Key::Num8, Digit::D8),
            (Key::Num9, Digit::D9),
        ];
        for (key, digit) in DIGIT_KEYS {
            if i.key_pressed(key) {
                self.session.press_digit(digit, now);
            }
        }
    }

    // Raw pointer translation against the rects painted this frame. While an
    // overlay is open its own buttons take the clicks; a press outside just
    // dismisses it.
    fn handle_pointer(&mut self, i: &InputState, now: f64) {
        let pos = i.pointer.interact_pos();

        if !self.session.overlay().is_none() {
            if i.pointer.primary_pressed()
                && let Some(pos) = pos
                && !self.overlay_rect().contains(pos)
            {
                self.session.close_overlay();
            }
            return;
        }

        if i.pointer.primary_pressed()
            && let Some(pos) = pos
        {
            if let Some(cell) = grid::cell_at_pos(self.grid_rect, pos) {
                self.session
                    .grid_pointer_down(cell, (pos.x, pos.y), now);
            } else if let Some(digit) = self.picker_digit_at(pos) {
                self.session
                    .picker_pointer_down(digit, (pos.x, pos.y), now);
            } else if self.picker_rects.as_ref().is_some_and(|r| r.erase.contains(pos)) {
                self.session.press_erase();
            } else if !self.chrome_rect.contains(pos) {
                self.session.pointer_down_outside();
            }
        }

        if let Some(pos) = pos {
            self.session
                .grid_pointer_move(grid::cell_at_pos(self.grid_rect, pos));
            self.session.picker_pointer_move((pos.x, pos.y));
        }

        if i.pointer.primary_released() {
            let hovered = pos.and_then(|pos| grid::cell_at_pos(self.grid_rect, pos));
            let modifiers = PointerModifiers {
                shift: i.modifiers.shift,
                ctrl: i.modifiers.ctrl || i.modifiers.command,
            };
            self.session.grid_pointer_up(hovered, modifiers, now);
            self.session.picker_pointer_up(now);
        }
    }

    fn picker_digit_at(&self, pos: Pos2) -> Option<Digit> {
        let rects = self.picker_rects.as_ref()?;
        Digit::ALL
            .into_iter()
            .find(|digit| rects.digits[usize::from(digit.index())].contains(pos))
    }

    fn overlay_rect(&self) -> Rect {
        match self.session.overlay() {
            Overlay::None => Rect::NOTHING,
            Overlay::Radial { anchor, .. } => Rect::from_center_size(
                Pos2::new(anchor.0, anchor.1),
                eframe::egui::Vec2::splat(260.0),
            ),
            Overlay::Pill { anchor, .. } => Rect::from_center_size(
                Pos2::new(anchor.0, anchor.1 - 40.0),
                eframe::egui::Vec2::new(180.0, 80.0),
            ),
        }
    }

    fn show_toolbar(&mut self, ui: &mut eframe::egui::Ui) -> Rect {
        let actions_rect = ui.horizontal(|ui| {
            let view_can_undo = self.session.can_undo();
            let view_can_redo = self.session.can_redo();
            if ui
                .add_enabled(view_can_undo, eframe::egui::Button::new("Undo"))
                .clicked()
            {
                let _ = self.session.undo();
            }
            if ui
                .add_enabled(view_can_redo, eframe::egui::Button::new("Redo"))
                .clicked()
            {
                let _ = self.session.redo();
            }
            ui.separator();
            if ui.button("New game").clicked() {
                self.new_game_open = true;
            }
            if ui.button("Reset").clicked() {
                self.session.reset_to_initial();
            }
            ui.separator();
            if ui.button("Hint").clicked() {
                let _ = self.session.solve_step();
            }
            if ui.button("Solve").clicked() {
                self.session.solve_all();
            }
        })
        .response
        .rect;
        let modes_rect = ui.horizontal(|ui| {
            let settings = self.session.settings_mut();
            ui.checkbox(&mut settings.show_candidates, "Candidates");
            ui.checkbox(&mut settings.blackout_mode, "Blackout");
            let mut isolation = self.session.isolation_active();
            if ui.checkbox(&mut isolation, "Isolate").changed() {
                self.session.toggle_isolation_mode();
            }
            ui.separator();
            let solved = self
                .session
                .solved()
                .solved_count(self.session.difficulty());
            ui.label(format!(
                "{} · {solved} solved",
                self.session.difficulty()
            ));
            if self.session.board().is_finished() {
                ui.label(RichText::new("Board complete!").strong());
            }
        })
        .response
        .rect;
        actions_rect.union(modes_rect)
    }

    fn show_new_game_modal(&mut self, ctx: &Context) {
        if !self.new_game_open {
            return;
        }
        let mut open = true;
        let mut chosen = None;
        Window::new("New game")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Difficulty:");
                for difficulty in Difficulty::ALL {
                    let solved = self.session.solved().solved_count(difficulty);
                    if ui
                        .button(format!("{difficulty} ({solved} solved)"))
                        .clicked()
                    {
                        chosen = Some(difficulty);
                    }
                }
            });
        if let Some(difficulty) = chosen {
            self.session.start_new_puzzle(difficulty);
            self.new_game_open = false;
        } else {
            self.new_game_open = open;
        }
    }
}

impl App for GridtapApp {
    fn save(&mut self, storage: &mut dyn Storage) {
        self.shared_storage.flush_to(storage);
        storage::save_settings(storage, self.session.settings());
    }

    fn auto_save_interval(&self) -> Duration {
        Duration::from_secs(30)
    }

    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now = ctx.input(|i| i.time);
        self.session.poll(now);
        self.session.set_modal_open(self.new_game_open);

        if !self.new_game_open {
            ctx.input(|i| self.handle_keys(i, now));
        }

        CentralPanel::default().show(ctx, |ui| {
            self.chrome_rect = self.show_toolbar(ui);
            ui.add_space(6.0);

            let view = self.session.view(now);
            self.grid_rect = grid::show(ui, &view);
            ui.add_space(8.0);
            self.picker_rects = Some(picker::show(ui, &view, self.session.highlight()));
        });

        overlays::show(ctx, &mut self.session, now);
        self.show_new_game_modal(ctx);

        if !self.new_game_open {
            ctx.input(|i| self.handle_pointer(i, now));
        }

        // Long-press deadlines and animation schedules need wall-clock
        // progress even without input events.
        ctx.request_repaint_after(Duration::from_millis(50));
    }
}
