use eframe::egui;

use crate::predict::{Predictor, RandomPredictor};
use crate::state::AppState;
use crate::ui::{panels, steps};
use crate::workflow::{InputMode, Step};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DetectorApp {
    pub state: AppState,
    predictor: Box<dyn Predictor>,
}

impl Default for DetectorApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
            predictor: Box::new(RandomPredictor::from_entropy()),
        }
    }
}

impl DetectorApp {
    /// Load the first file dropped onto the window as an upload.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = dropped.into_iter().find_map(|f| f.path) else {
            return;
        };
        self.state.select_step(Step::DataInput);
        self.state.input_mode = InputMode::Upload;
        panels::load_path(&mut self.state, &path);
    }
}

impl eframe::App for DetectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: workflow steps ----
        egui::SidePanel::left("step_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current step ----
        egui::CentralPanel::default().show(ctx, |ui| {
            steps::show(ui, &mut self.state, self.predictor.as_mut());
        });
    }
}
