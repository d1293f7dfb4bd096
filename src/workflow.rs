//! The five workflow steps as plain functions over [`WorkflowState`].
//!
//! Nothing here touches egui: each handler takes the current state plus the
//! user's input for that step, mutates the state, and reports what happened.
//! `ui::steps` renders the outcome.

use crate::data::model::{Dataset, LABEL_COLUMN};
use crate::data::preprocess::{self, PreprocessOptions};
use crate::data::stats::{self, HISTOGRAM_BINS, Histogram, LabelCounts};
use crate::error::WorkflowError;
use crate::predict::{ModelKind, PredictionResult, Predictor};
use crate::state::{ManualSample, WorkflowState};

/// Rows shown in table previews.
pub const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Step selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    DataInput,
    Preprocessing,
    Prediction,
    Visualization,
    Results,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::DataInput,
        Step::Preprocessing,
        Step::Prediction,
        Step::Visualization,
        Step::Results,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Step::DataInput => "1. Data Input",
            Step::Preprocessing => "2. Preprocessing",
            Step::Prediction => "3. Prediction",
            Step::Visualization => "4. Visualization",
            Step::Results => "5. Results",
        }
    }

    /// Page heading.
    pub fn heading(self) -> &'static str {
        match self {
            Step::DataInput => "1. Load or Enter Data",
            Step::Preprocessing => "2. Preprocessing",
            Step::Prediction => "3. Run ANN Prediction",
            Step::Visualization => "4. Visualization",
            Step::Results => "5. Final Results & Recommendations",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Upload,
    Manual,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    BarCount,
    FeatureHistogram,
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

/// Status line shown under the step heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Warning(String),
    Error(String),
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Success(s) | Banner::Warning(s) | Banner::Error(s) => s,
        }
    }
}

impl From<WorkflowError> for Banner {
    fn from(err: WorkflowError) -> Self {
        Banner::Warning(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Step 1: data input
// ---------------------------------------------------------------------------

/// Replace the dataset with an uploaded table.
///
/// `None` means no file was chosen: the state is left alone and there is
/// nothing to report.
pub fn load_upload(state: &mut WorkflowState, upload: Option<Dataset>) -> Option<Banner> {
    let dataset = upload?;
    let banner = Banner::Success(format!(
        "Loaded {} rows and {} columns",
        dataset.len(),
        dataset.width()
    ));
    log::info!("Loaded dataset: {dataset} {:?}", dataset.columns());
    state.dataset = Some(dataset);
    Some(banner)
}

/// Append the manual-entry values as one row, creating the table on first use.
pub fn add_sample<'a>(state: &'a mut WorkflowState, sample: &ManualSample) -> &'a Dataset {
    let dataset = state.dataset.get_or_insert_with(Dataset::empty_features);
    dataset.append_record(sample.record());
    log::info!("Added manual sample #{}: {:?}", dataset.len(), sample.values);
    dataset
}

// ---------------------------------------------------------------------------
// Step 2: preprocessing
// ---------------------------------------------------------------------------

/// What an applied preprocessing pass changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessReport {
    pub rows_before: usize,
    pub rows_after: usize,
    /// Columns with no spread that normalization turned into `NaN`.
    pub nan_columns: Vec<String>,
}

impl PreprocessReport {
    pub fn banners(&self) -> Vec<Banner> {
        let mut out = vec![Banner::Success("Preprocessing applied.".to_string())];
        if self.rows_after < self.rows_before {
            out.push(Banner::Success(format!(
                "Dropped {} of {} rows.",
                self.rows_before - self.rows_after,
                self.rows_before
            )));
        }
        if !self.nan_columns.is_empty() {
            out.push(Banner::Warning(format!(
                "Columns with a single value normalized to NaN: {}",
                self.nan_columns.join(", ")
            )));
        }
        out
    }
}

/// Commit the selected transforms to the dataset.  There is no undo.
pub fn preprocess(
    state: &mut WorkflowState,
    options: PreprocessOptions,
) -> Result<PreprocessReport, WorkflowError> {
    let dataset = state.dataset.as_mut().ok_or(WorkflowError::NoData)?;

    let nan_columns = if options.normalize {
        preprocess::zero_range_columns(dataset)
    } else {
        Vec::new()
    };
    if !nan_columns.is_empty() {
        log::warn!("Zero-range columns normalize to NaN: {nan_columns:?}");
    }

    let rows_before = dataset.len();
    *dataset = preprocess::apply(dataset, options);
    let rows_after = dataset.len();

    log::info!("Preprocessing {options:?}: {rows_before} → {rows_after} rows");
    if state.predictions_stale() {
        log::warn!("Predictions no longer match the dataset after preprocessing");
    }

    Ok(PreprocessReport {
        rows_before,
        rows_after,
        nan_columns,
    })
}

// ---------------------------------------------------------------------------
// Step 3: prediction
// ---------------------------------------------------------------------------

/// Label every row, store the result, and write the label column.
pub fn predict<'a>(
    state: &'a mut WorkflowState,
    predictor: &mut dyn Predictor,
    model: ModelKind,
) -> Result<&'a PredictionResult, WorkflowError> {
    let dataset = state.dataset.as_mut().ok_or(WorkflowError::NoData)?;

    let result = PredictionResult {
        model,
        labels: predictor.predict(model, dataset),
    };
    dataset.set_column(LABEL_COLUMN, &result.as_column());

    log::info!(
        "{model} flagged {} of {} samples",
        result.flagged(),
        result.len()
    );
    Ok(state.predictions.insert(result))
}

// ---------------------------------------------------------------------------
// Step 4: visualization
// ---------------------------------------------------------------------------

/// Chart data ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    LabelBars(LabelCounts),
    FeatureHistogram { feature: String, histogram: Histogram },
}

/// Dataset plus its label column, or the reason they are unavailable.
fn labelled(state: &WorkflowState) -> Result<(&Dataset, Vec<f64>), WorkflowError> {
    if state.predictions.is_none() {
        return Err(WorkflowError::NoPredictions);
    }
    let dataset = state.dataset.as_ref().ok_or(WorkflowError::StalePredictions)?;
    let labels = dataset
        .column_by_name(LABEL_COLUMN)
        .ok_or(WorkflowError::StalePredictions)?;
    Ok((dataset, labels))
}

/// Columns the histogram may be drawn for: everything but the label column.
pub fn histogram_features(state: &WorkflowState) -> Vec<String> {
    state
        .dataset
        .iter()
        .flat_map(|ds| ds.columns())
        .filter(|c| c.as_str() != LABEL_COLUMN)
        .cloned()
        .collect()
}

/// Build the requested chart.  A histogram with no (or an unknown) feature
/// falls back to the first eligible column.
pub fn visualize(
    state: &WorkflowState,
    chart: ChartKind,
    feature: Option<&str>,
) -> Result<Chart, WorkflowError> {
    let (dataset, labels) = labelled(state)?;

    match chart {
        ChartKind::BarCount => Ok(Chart::LabelBars(LabelCounts::from_column(labels))),
        ChartKind::FeatureHistogram => {
            let features = histogram_features(state);
            let feature = feature
                .filter(|f| features.iter().any(|c| c == f))
                .map(str::to_string)
                .or_else(|| features.first().cloned())
                .unwrap_or_default();
            let values = dataset.column_by_name(&feature).unwrap_or_default();
            Ok(Chart::FeatureHistogram {
                histogram: stats::histogram(&values, HISTOGRAM_BINS),
                feature,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Step 5: results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Caution,
    AllClear,
}

impl Verdict {
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Caution => {
                "Adulteration detected. Recommend further lab tests and inform the treating physician."
            }
            Verdict::AllClear => "No adulteration detected. Safe for patient consumption.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsSummary {
    pub total: usize,
    pub flagged: usize,
}

impl ResultsSummary {
    pub fn sentence(&self) -> String {
        format!("{} of {} samples flagged as adulterated.", self.flagged, self.total)
    }

    pub fn verdict(&self) -> Verdict {
        if self.flagged > 0 {
            Verdict::Caution
        } else {
            Verdict::AllClear
        }
    }
}

pub fn results(state: &WorkflowState) -> Result<ResultsSummary, WorkflowError> {
    let (dataset, labels) = labelled(state)?;
    Ok(ResultsSummary {
        total: dataset.len(),
        flagged: stats::flagged_count(labels),
    })
}
