use eframe::egui::{self, ComboBox, DragValue, Ui};

use crate::data::model::FEATURE_NAMES;
use crate::error::WorkflowError;
use crate::predict::{ModelKind, Predictor};
use crate::state::AppState;
use crate::ui::{panels, plot, table};
use crate::workflow::{self, Banner, Chart, ChartKind, InputMode, PREVIEW_ROWS, Step, Verdict};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Render the selected step in the central panel.
pub fn show(ui: &mut Ui, state: &mut AppState, predictor: &mut dyn Predictor) {
    ui.heading(state.step.heading());
    ui.add_space(4.0);

    match state.step {
        Step::DataInput => data_input(ui, state),
        Step::Preprocessing => preprocessing(ui, state),
        Step::Prediction => prediction(ui, state, predictor),
        Step::Visualization => visualization(ui, state),
        Step::Results => results(ui, state),
    }
}

fn show_banners(ui: &mut Ui, state: &AppState) {
    for b in &state.banners {
        panels::banner(ui, b);
    }
}

// ---------------------------------------------------------------------------
// 1. Data input
// ---------------------------------------------------------------------------

fn data_input(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Choose input mode");
        ui.radio_value(&mut state.input_mode, InputMode::Upload, "Upload file");
        ui.radio_value(&mut state.input_mode, InputMode::Manual, "Manual Entry");
    });
    ui.separator();

    match state.input_mode {
        InputMode::Upload => {
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Choose file…").clicked() {
                    panels::open_file_dialog(state);
                }
                ui.weak("or drop a CSV / TSV / JSON / Parquet file onto the window");
            });
            show_banners(ui, state);
            if let Some(ds) = &state.workflow.dataset {
                ui.add_space(4.0);
                table::dataset_table(ui, "upload_preview", ds, Some(PREVIEW_ROWS));
            }
        }
        InputMode::Manual => {
            ui.label("Enter feature values for one sample:");
            egui::Grid::new("manual_entry")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui: &mut Ui| {
                    for (name, value) in FEATURE_NAMES.iter().zip(state.manual.values.iter_mut()) {
                        ui.label(*name);
                        ui.add(DragValue::new(value).speed(0.01).fixed_decimals(3));
                        ui.end_row();
                    }
                });

            if ui.button("Add Sample").clicked() {
                workflow::add_sample(&mut state.workflow, &state.manual);
            }
            if let Some(ds) = &state.workflow.dataset {
                ui.add_space(4.0);
                table::dataset_table(ui, "manual_table", ds, None);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Preprocessing
// ---------------------------------------------------------------------------

fn preprocessing(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.workflow.dataset else {
        panels::banner(ui, &WorkflowError::NoData.into());
        return;
    };

    ui.label("Current data preview:");
    table::dataset_table(ui, "preprocess_before", ds, Some(PREVIEW_ROWS));
    ui.separator();

    ui.checkbox(&mut state.preprocess.normalize, "Normalize features (min–max)");
    ui.checkbox(&mut state.preprocess.drop_zero_rows, "Drop rows with any zero values");

    if ui.button("Apply").clicked() {
        if let Ok(report) = workflow::preprocess(&mut state.workflow, state.preprocess) {
            state.banners = report.banners();
        }
    }
    show_banners(ui, state);
}

// ---------------------------------------------------------------------------
// 3. Prediction
// ---------------------------------------------------------------------------

fn prediction(ui: &mut Ui, state: &mut AppState, predictor: &mut dyn Predictor) {
    if state.workflow.dataset.is_none() {
        panels::banner(ui, &WorkflowError::NoData.into());
        return;
    }

    ComboBox::from_label("Select ANN model (black-box)")
        .selected_text(state.model.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for model in ModelKind::ALL {
                ui.selectable_value(&mut state.model, model, model.to_string());
            }
        });

    if ui.button("Predict Adulteration").clicked() {
        if workflow::predict(&mut state.workflow, predictor, state.model).is_ok() {
            state.banners = vec![Banner::Success("Prediction complete.".to_string())];
        }
    }

    show_banners(ui, state);
    if state.workflow.predictions.is_some() {
        if let Some(ds) = &state.workflow.dataset {
            table::dataset_table(ui, "prediction_table", ds, None);
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Visualization
// ---------------------------------------------------------------------------

fn visualization(ui: &mut Ui, state: &mut AppState) {
    let features = workflow::histogram_features(&state.workflow);

    let chart = match workflow::visualize(
        &state.workflow,
        state.chart,
        state.histogram_feature.as_deref(),
    ) {
        Ok(chart) => chart,
        Err(e) => {
            panels::banner(ui, &e.into());
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ComboBox::from_label("Select chart type")
            .selected_text(match state.chart {
                ChartKind::BarCount => "Bar count",
                ChartKind::FeatureHistogram => "Histogram of a feature",
            })
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut state.chart, ChartKind::BarCount, "Bar count");
                ui.selectable_value(
                    &mut state.chart,
                    ChartKind::FeatureHistogram,
                    "Histogram of a feature",
                );
            });

        if let Chart::FeatureHistogram { feature, .. } = &chart {
            ComboBox::from_label("Feature to histogram")
                .selected_text(feature.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for f in &features {
                        if ui.selectable_label(f == feature, f).clicked() {
                            state.histogram_feature = Some(f.clone());
                        }
                    }
                });
        }
    });

    match &chart {
        Chart::LabelBars(counts) => plot::label_bar_chart(ui, counts),
        Chart::FeatureHistogram { feature, histogram } => {
            plot::feature_histogram(ui, feature, histogram)
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Results
// ---------------------------------------------------------------------------

fn results(ui: &mut Ui, state: &AppState) {
    let summary = match workflow::results(&state.workflow) {
        Ok(summary) => summary,
        Err(e) => {
            panels::banner(ui, &e.into());
            return;
        }
    };

    ui.label(egui::RichText::new(summary.sentence()).strong().size(16.0));
    ui.add_space(6.0);

    let verdict = summary.verdict();
    let message = verdict.message().to_string();
    let banner = match verdict {
        Verdict::Caution => Banner::Warning(message),
        Verdict::AllClear => Banner::Success(message),
    };
    panels::banner(ui, &banner);
}
