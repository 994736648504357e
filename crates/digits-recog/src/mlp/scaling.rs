//! Per-column input standardization

/// Affine map `(x - mean) * inv_std` per column, fitted on training data
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnScaling {
    mean: Vec<f32>,
    inv_std: Vec<f32>,
}

impl ColumnScaling {
    /// Fit on `rows` of length `cols`
    ///
    /// Columns with no spread are only centred.
    pub fn fit<'a>(rows: impl Iterator<Item = &'a [f32]>, cols: usize) -> Self {
        let mut sum = vec![0.0f64; cols];
        let mut sum_sq = vec![0.0f64; cols];
        let mut n = 0usize;
        for row in rows {
            for ((s, q), &v) in sum.iter_mut().zip(sum_sq.iter_mut()).zip(row) {
                *s += v as f64;
                *q += v as f64 * v as f64;
            }
            n += 1;
        }
        let n = n.max(1) as f64;
        let mut mean = Vec::with_capacity(cols);
        let mut inv_std = Vec::with_capacity(cols);
        for (s, q) in sum.into_iter().zip(sum_sq) {
            let m = s / n;
            let var = (q / n - m * m).max(0.0);
            let sd = var.sqrt();
            mean.push(m as f32);
            inv_std.push(if sd > f32::EPSILON as f64 {
                (1.0 / sd) as f32
            } else {
                1.0
            });
        }
        Self { mean, inv_std }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Check if the scaling has no columns
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Scale `row` into `out`
    pub fn apply_into(&self, row: &[f32], out: &mut Vec<f32>) {
        out.clear();
        out.extend(
            row.iter()
                .zip(self.mean.iter().zip(&self.inv_std))
                .map(|(&v, (&m, &s))| (v - m) * s),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardizes_columns() {
        let rows: Vec<[f32; 2]> = vec![[0.0, 5.0], [255.0, 5.0], [0.0, 5.0], [255.0, 5.0]];
        let scaling = ColumnScaling::fit(rows.iter().map(|r| &r[..]), 2);
        let mut out = Vec::new();
        scaling.apply_into(&[255.0, 5.0], &mut out);
        // Column 0: mean 127.5, std 127.5. Column 1 is constant: centred only
        assert!((out[0] - 1.0).abs() < 1e-6);
        assert_eq!(out[1], 0.0);
        scaling.apply_into(&[0.0, 7.0], &mut out);
        assert!((out[0] + 1.0).abs() < 1e-6);
        assert_eq!(out[1], 2.0);
    }
}
