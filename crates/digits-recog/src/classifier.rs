//! Classifier interface
//!
//! The pipeline trains and queries models only through [`Classifier`], so
//! a backend can be swapped without touching dataset construction or
//! evaluation.

use crate::RecogResult;
use crate::dataset::{Matrix, argmax};

/// A trainable multi-class classifier over fixed-length feature rows
pub trait Classifier: Sized {
    /// Backend-specific training parameters
    type Params;

    /// Train a model on paired feature and label rows
    ///
    /// `labels` holds one score row per sample (one-hot for digit
    /// classification); its column count is the number of classes.
    fn train(features: &Matrix, labels: &Matrix, params: &Self::Params) -> RecogResult<Self>;

    /// Class scores for one feature row
    fn predict(&self, sample: &[f32]) -> RecogResult<Vec<f32>>;

    /// Index of the highest class score, the first one on ties
    fn predict_class(&self, sample: &[f32]) -> RecogResult<usize> {
        let scores = self.predict(sample)?;
        Ok(argmax(&scores).unwrap_or(0))
    }
}
