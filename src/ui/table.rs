use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Dataset, format_cell};

// ---------------------------------------------------------------------------
// Dataset table
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

/// Show the first `limit` rows of `dataset` (all rows when `None`).
///
/// `id` keeps the scroll/resize state of several tables on one page apart.
pub fn dataset_table(ui: &mut Ui, id: &str, dataset: &Dataset, limit: Option<usize>) {
    let rows = match limit {
        Some(n) => dataset.head(n),
        None => dataset.rows(),
    };

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(320.0)
            .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
            .column(Column::auto().at_least(32.0))
            .columns(Column::auto().at_least(72.0), dataset.width())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for name in dataset.columns() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let idx = row.index();
                    row.col(|ui: &mut Ui| {
                        ui.label(idx.to_string());
                    });
                    for &value in &rows[idx] {
                        row.col(|ui: &mut Ui| {
                            ui.monospace(format_cell(value));
                        });
                    }
                });
            });
    });

    if let Some(n) = limit {
        if dataset.len() > n {
            ui.weak(format!("… {} more rows", dataset.len() - n));
        }
    }
}
