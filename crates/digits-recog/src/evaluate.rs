//! Accuracy over a labeled dataset

use crate::RecogResult;
use crate::classifier::Classifier;
use crate::dataset::{Dataset, argmax};

/// Prediction outcome over one dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Number of samples evaluated
    pub samples: usize,
    /// Samples whose predicted class differs from the label
    pub misses: usize,
}

impl Evaluation {
    /// Percentage of correct predictions, `None` for an empty dataset
    pub fn percent_correct(&self) -> Option<f64> {
        if self.samples == 0 {
            return None;
        }
        Some((self.samples - self.misses) as f64 / self.samples as f64 * 100.0)
    }
}

/// Predict every sample of `data` and count the misses
///
/// The true class of a sample is the index of the largest value in its
/// label row.
pub fn evaluate<C: Classifier>(model: &C, data: &Dataset) -> RecogResult<Evaluation> {
    let mut eval = Evaluation::default();
    for (features, label) in data.samples() {
        let truth = argmax(label).unwrap_or(0);
        if model.predict_class(features)? != truth {
            eval.misses += 1;
        }
        eval.samples += 1;
    }
    Ok(eval)
}
