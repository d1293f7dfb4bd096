mod app;
mod color;
mod data;
mod error;
mod predict;
mod state;
mod ui;
mod workflow;

use app::DetectorApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 420.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Food Adulteration Detector",
        options,
        Box::new(|_cc| Ok(Box::new(DetectorApp::default()))),
    )
}
