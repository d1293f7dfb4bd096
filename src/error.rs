use thiserror::Error;

/// A step was opened before the state it needs exists.
///
/// These never abort anything: the UI shows the message as a warning banner
/// and renders nothing else for the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("No data: go to Step 1 to load or enter samples.")]
    NoData,

    #[error("No predictions: complete Step 3 first.")]
    NoPredictions,

    /// Predictions exist but the dataset no longer carries the label column
    /// (for example after a fresh upload).
    #[error("Predictions are out of date: run Step 3 again.")]
    StalePredictions,
}
