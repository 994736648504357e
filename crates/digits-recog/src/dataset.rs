//! Feature and label matrices
//!
//! A [`Dataset`] pairs a feature matrix with a label matrix. Rows are
//! appended together, so both matrices always have the same row count.

use crate::{RecogError, RecogResult};

/// Number of digit classes
pub const NUM_CLASSES: usize = 10;

/// Growable row-major matrix with a fixed column count
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Create an empty matrix with `cols` columns
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            data: Vec::new(),
        }
    }

    /// Create a matrix from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if `cols` is 0 or `data` is not a whole number of rows.
    pub fn from_rows(cols: usize, data: Vec<f32>) -> RecogResult<Self> {
        if cols == 0 {
            return Err(RecogError::InvalidParameter(
                "matrix must have at least one column".to_string(),
            ));
        }
        if data.len() % cols != 0 {
            return Err(RecogError::InvalidParameter(format!(
                "{} values do not fill rows of {}",
                data.len(),
                cols
            )));
        }
        Ok(Self { cols, data })
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.data.len() / self.cols
        }
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if the matrix has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get row `index`
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.cols)?;
        self.data.get(start..start + self.cols)
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on a zero size
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Append a row
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::DimensionMismatch`] if the row does not have
    /// exactly [`Matrix::cols`] values.
    pub fn push_row(&mut self, row: &[f32]) -> RecogResult<()> {
        if row.len() != self.cols {
            return Err(RecogError::DimensionMismatch {
                expected: self.cols,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    /// Row-major data
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Paired feature and label matrices
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Matrix,
    labels: Matrix,
}

impl Dataset {
    /// Create an empty dataset for `feature_len` features and `classes`
    /// label columns
    pub fn new(feature_len: usize, classes: usize) -> Self {
        Self {
            features: Matrix::new(feature_len),
            labels: Matrix::new(classes),
        }
    }

    /// Append one sample
    ///
    /// Both rows are checked before either is stored, so a failed push
    /// leaves the dataset unchanged.
    pub fn push(&mut self, features: &[f32], label: &[f32]) -> RecogResult<()> {
        if label.len() != self.labels.cols() {
            return Err(RecogError::DimensionMismatch {
                expected: self.labels.cols(),
                actual: label.len(),
            });
        }
        self.features.push_row(features)?;
        self.labels.push_row(label)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.features.rows()
    }

    /// Check if the dataset has no samples
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature matrix
    pub fn features(&self) -> &Matrix {
        &self.features
    }

    /// Label matrix
    pub fn labels(&self) -> &Matrix {
        &self.labels
    }

    /// Iterate over `(features, label)` row pairs
    pub fn samples(&self) -> impl Iterator<Item = (&[f32], &[f32])> {
        self.features.iter_rows().zip(self.labels.iter_rows())
    }
}

/// One-hot vector of length `classes` with 1.0 at `label`
///
/// A label outside `0..classes` gives an all-zero vector.
pub fn one_hot(label: usize, classes: usize) -> Vec<f32> {
    let mut v = vec![0.0; classes];
    if let Some(slot) = v.get_mut(label) {
        *slot = 1.0;
    }
    v
}

/// Index of the largest value, the first one on ties
///
/// Returns `None` for an empty slice. NaN loses to any number.
pub fn argmax(values: &[f32]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || (values[best].is_nan() && !v.is_nan()) {
            best = i;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_argmax() {
        for label in 0..NUM_CLASSES {
            let v = one_hot(label, NUM_CLASSES);
            assert_eq!(v.len(), NUM_CLASSES);
            assert_eq!(v.iter().sum::<f32>(), 1.0);
            assert_eq!(argmax(&v), Some(label));
        }
        assert!(one_hot(12, NUM_CLASSES).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_argmax_ties_and_edges() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[0.5, 0.9, 0.9]), Some(1));
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), Some(1));
        assert_eq!(argmax(&[f32::NAN, 0.1]), Some(1));
        assert_eq!(argmax(&[f32::NAN]), Some(0));
    }

    #[test]
    fn test_matrix_rows() {
        let mut m = Matrix::new(3);
        assert!(m.is_empty());
        m.push_row(&[1.0, 2.0, 3.0]).unwrap();
        m.push_row(&[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(m.row(2), None);
        assert_eq!(m.iter_rows().count(), 2);
        assert!(matches!(
            m.push_row(&[1.0]),
            Err(RecogError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        ));
        assert_eq!(m.rows(), 2);
    }

    #[test]
    fn test_matrix_from_rows() {
        let m = Matrix::from_rows(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.rows(), 2);
        assert!(Matrix::from_rows(2, vec![1.0, 2.0, 3.0]).is_err());
        assert!(Matrix::from_rows(0, vec![]).is_err());
    }

    #[test]
    fn test_dataset_push_is_paired() {
        let mut ds = Dataset::new(4, NUM_CLASSES);
        ds.push(&[0.0; 4], &one_hot(3, NUM_CLASSES)).unwrap();
        // Wrong label length: nothing is stored
        assert!(ds.push(&[0.0; 4], &[1.0]).is_err());
        // Wrong feature length: nothing is stored either
        assert!(ds.push(&[0.0; 3], &one_hot(1, NUM_CLASSES)).is_err());
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.features().rows(), ds.labels().rows());
        let (_, label) = ds.samples().next().unwrap();
        assert_eq!(argmax(label), Some(3));
    }
}
