use std::path::Path;

use eframe::egui::{self, RichText, Ui};

use crate::color;
use crate::data::loader::{self, SUPPORTED_EXTENSIONS};
use crate::state::AppState;
use crate::workflow::{self, Banner, InputMode, Step};

// ---------------------------------------------------------------------------
// Left side panel – workflow navigation
// ---------------------------------------------------------------------------

/// Render the step selector.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Food Adulteration Detector");
    ui.separator();

    ui.strong("Workflow Step");
    let mut selected = state.step;
    for step in Step::ALL {
        ui.radio_value(&mut selected, step, step.label());
    }
    state.select_step(selected);

    ui.separator();

    // ---- Session summary ----
    match &state.workflow.dataset {
        Some(ds) => {
            ui.label(format!("Dataset: {ds}"));
        }
        None => {
            ui.weak("No dataset loaded.");
        }
    }
    if let Some(preds) = &state.workflow.predictions {
        ui.label(format!("Predictions: {} ({})", preds.len(), preds.model));
    }
    if state.workflow.predictions_stale() {
        ui.label(
            RichText::new("Predictions no longer match the data.")
                .color(color::from_hue(40.0)),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                state.select_step(Step::DataInput);
                state.input_mode = InputMode::Upload;
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.step.label());
    });
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

pub fn banner(ui: &mut Ui, banner: &Banner) {
    ui.label(RichText::new(banner.text()).color(color::banner_color(banner)));
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Ask for a file and load it.  Cancelling the dialog does nothing.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sample data")
        .add_filter("Supported files", &SUPPORTED_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .add_filter("Tab-separated", &["tsv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_path(state, &path);
    }
}

/// Load `path` into the workflow, reporting success or failure as a banner.
pub fn load_path(state: &mut AppState, path: &Path) {
    match loader::load_file(path) {
        Ok(dataset) => {
            state.banners = workflow::load_upload(&mut state.workflow, Some(dataset))
                .into_iter()
                .collect();
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.banners = vec![Banner::Error(format!("Error: {e:#}"))];
        }
    }
}
