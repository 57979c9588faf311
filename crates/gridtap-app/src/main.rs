//! Gridtap desktop application using egui/eframe.
//!
//! This binary is a thin shell: it translates egui pointer/keyboard input
//! into session events and paints the session's render projection. All game
//! logic lives in `gridtap-session`.

use eframe::{
    NativeOptions,
    egui::{self, Vec2},
};

use crate::app::GridtapApp;

mod app;
mod storage;
mod ui;

fn main() -> eframe::Result<()> {
    better_panic::install();
    env_logger::init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_resizable(true)
            .with_inner_size(Vec2::new(560.0, 760.0))
            .with_min_inner_size(Vec2::new(400.0, 560.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Gridtap",
        options,
        Box::new(|cc| Ok(Box::new(GridtapApp::new(cc)))),
    )
}
