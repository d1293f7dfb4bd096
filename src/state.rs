use crate::data::model::{Dataset, FEATURE_NAMES, LABEL_COLUMN};
use crate::data::preprocess::PreprocessOptions;
use crate::predict::{ModelKind, PredictionResult};
use crate::workflow::{Banner, ChartKind, InputMode, Step};

// ---------------------------------------------------------------------------
// Workflow state
// ---------------------------------------------------------------------------

/// Session data threaded through the five steps.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    /// Working table (None until the user uploads or enters a sample).
    pub dataset: Option<Dataset>,

    /// Labels from the last prediction run.
    pub predictions: Option<PredictionResult>,
}

impl WorkflowState {
    /// True when predictions exist but no longer line up with the dataset:
    /// the row count changed, or the label column is gone.
    ///
    /// Nothing clears predictions automatically; this only reports it.
    pub fn predictions_stale(&self) -> bool {
        match (&self.dataset, &self.predictions) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(ds), Some(p)) => ds.len() != p.len() || !ds.has_column(LABEL_COLUMN),
        }
    }
}

// ---------------------------------------------------------------------------
// Manual entry form
// ---------------------------------------------------------------------------

/// Current values of the per-feature number inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualSample {
    pub values: [f64; FEATURE_NAMES.len()],
}

impl Default for ManualSample {
    fn default() -> Self {
        Self {
            values: [0.0; FEATURE_NAMES.len()],
        }
    }
}

impl ManualSample {
    /// `(feature, value)` pairs in form order.
    pub fn record(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    pub workflow: WorkflowState,

    /// Selected sidebar step.
    pub step: Step,

    pub input_mode: InputMode,
    pub manual: ManualSample,
    pub preprocess: PreprocessOptions,
    pub model: ModelKind,
    pub chart: ChartKind,

    /// Column picked for the histogram.
    pub histogram_feature: Option<String>,

    /// Outcome of the last action, shown until the step changes.
    pub banners: Vec<Banner>,
}

impl AppState {
    /// Switch steps; the previous step's banner does not carry over.
    pub fn select_step(&mut self, step: Step) {
        if self.step != step {
            log::debug!("Switching to step {step:?}");
            self.step = step;
            self.banners.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::Label;

    #[test]
    fn session_starts_empty_on_data_input() {
        let state = AppState::default();
        assert_eq!(state.step, Step::DataInput);
        assert!(state.workflow.dataset.is_none());
        assert!(state.workflow.predictions.is_none());
        assert_eq!(state.manual.values, [0.0; 4]);
    }

    #[test]
    fn changing_step_clears_banner() {
        let mut state = AppState {
            banners: vec![Banner::Success("done".into())],
            ..Default::default()
        };
        state.select_step(Step::DataInput);
        assert_eq!(state.banners.len(), 1);
        state.select_step(Step::Results);
        assert!(state.banners.is_empty());
        assert_eq!(state.step, Step::Results);
    }

    #[test]
    fn staleness_follows_row_count_and_label_column() {
        let mut ds = Dataset::empty_features();
        ds.append_record(ManualSample::default().record());
        ds.set_column(LABEL_COLUMN, &[1.0]);

        let mut wf = WorkflowState {
            dataset: Some(ds),
            predictions: Some(PredictionResult {
                model: ModelKind::default(),
                labels: vec![Label::Adulterated],
            }),
        };
        assert!(!wf.predictions_stale());

        if let Some(ds) = wf.dataset.as_mut() {
            ds.append_record(ManualSample::default().record());
        }
        assert!(wf.predictions_stale());

        wf.dataset = Some(Dataset::empty_features());
        wf.predictions = None;
        assert!(!wf.predictions_stale());
    }
}
