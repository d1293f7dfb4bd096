use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Binary classification outcome for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Pure = 0,
    Adulterated = 1,
}

impl Label {
    /// Both labels in ascending order.
    pub const ALL: [Label; 2] = [Label::Pure, Label::Adulterated];

    /// Numeric value stored in the label column.
    pub fn as_f64(self) -> f64 {
        self as u8 as f64
    }

    /// Axis / legend caption.
    pub fn caption(self) -> &'static str {
        match self {
            Label::Pure => "Pure (0)",
            Label::Adulterated => "Adulterated (1)",
        }
    }
}

// ---------------------------------------------------------------------------
// Model identifiers
// ---------------------------------------------------------------------------

/// Placeholder network architectures offered in the model picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelKind {
    #[default]
    SimpleDense,
    ConvNet,
    CustomNet,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::SimpleDense, ModelKind::ConvNet, ModelKind::CustomNet];
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::SimpleDense => "SimpleDense",
            ModelKind::ConvNet => "ConvNet",
            ModelKind::CustomNet => "CustomNet",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Prediction results
// ---------------------------------------------------------------------------

/// One label per dataset row, aligned by row index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub model: ModelKind,
    pub labels: Vec<Label>,
}

impl PredictionResult {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Label column values as written onto the dataset.
    pub fn as_column(&self) -> Vec<f64> {
        self.labels.iter().map(|l| l.as_f64()).collect()
    }

    pub fn flagged(&self) -> usize {
        self.labels.iter().filter(|&&l| l == Label::Adulterated).count()
    }
}

// ---------------------------------------------------------------------------
// Inference boundary
// ---------------------------------------------------------------------------

/// Anything that turns a feature table into one label per row.
pub trait Predictor {
    fn predict(&mut self, model: ModelKind, dataset: &Dataset) -> Vec<Label>;
}

/// Stand-in classifier: independent fair coin flip per row.
pub struct RandomPredictor {
    rng: StdRng,
}

impl RandomPredictor {
    /// Unseeded; every session draws different labels.
    pub fn from_entropy() -> Self {
        RandomPredictor {
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        RandomPredictor {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Predictor for RandomPredictor {
    fn predict(&mut self, _model: ModelKind, dataset: &Dataset) -> Vec<Label> {
        (0..dataset.len())
            .map(|_| {
                if self.rng.gen_bool(0.5) {
                    Label::Adulterated
                } else {
                    Label::Pure
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Dataset {
        let mut ds = Dataset::empty_features();
        for i in 0..n {
            ds.append_record([("pH", i as f64)]);
        }
        ds
    }

    #[test]
    fn one_label_per_row() {
        let mut predictor = RandomPredictor::seeded(7);
        for n in [0, 1, 25] {
            for model in ModelKind::ALL {
                assert_eq!(predictor.predict(model, &rows(n)).len(), n);
            }
        }
    }

    #[test]
    fn both_labels_appear_over_many_rows() {
        let labels = RandomPredictor::seeded(1).predict(ModelKind::ConvNet, &rows(500));
        assert!(labels.contains(&Label::Pure));
        assert!(labels.contains(&Label::Adulterated));
    }

    #[test]
    fn result_column_matches_labels() {
        let result = PredictionResult {
            model: ModelKind::SimpleDense,
            labels: vec![Label::Pure, Label::Adulterated, Label::Adulterated],
        };
        assert_eq!(result.as_column(), vec![0.0, 1.0, 1.0]);
        assert_eq!(result.flagged(), 2);
    }

    #[test]
    fn captions_and_names() {
        assert_eq!(Label::ALL.map(Label::caption), ["Pure (0)", "Adulterated (1)"]);
        assert_eq!(ModelKind::CustomNet.to_string(), "CustomNet");
    }
}
