use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color;
use crate::data::stats::{Histogram, LabelCounts};

const PLOT_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Label bar chart
// ---------------------------------------------------------------------------

/// Two bars, Pure then Adulterated, one per legend entry.
pub fn label_bar_chart(ui: &mut Ui, counts: &LabelCounts) {
    Plot::new("label_bars")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Label")
        .y_axis_label("Sample count")
        .include_y(0.0)
        .include_x(-0.5)
        .include_x(1.5)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (label, count) in counts.bars() {
                let caption = label.caption();
                let bar = Bar::new(label.as_f64(), count as f64)
                    .name(caption)
                    .width(0.6);
                let chart = BarChart::new(vec![bar])
                    .name(caption)
                    .color(color::label_color(label));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Feature histogram
// ---------------------------------------------------------------------------

/// Adjacent bars, one per bucket, labelled with the feature name.
pub fn feature_histogram(ui: &mut Ui, feature: &str, histogram: &Histogram) {
    let width = histogram.bin_width();
    let bars: Vec<Bar> = histogram
        .centers()
        .zip(&histogram.counts)
        .map(|(center, &count)| Bar::new(center, count as f64).width(width))
        .collect();

    Plot::new("feature_histogram")
        .height(PLOT_HEIGHT)
        .x_axis_label(feature)
        .y_axis_label("Frequency")
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(feature)
                    .color(color::feature_color()),
            );
        });
}
