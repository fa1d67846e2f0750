//! Regression result structures.

use faer::{Col, Mat};

/// Linear model produced by a PLS fit, in the units of the training data.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionResult {
    /// Estimated coefficients (excluding intercept).
    pub coefficients: Col<f64>,

    /// Intercept term.
    pub intercept: f64,

    /// Number of latent components actually extracted.
    pub n_components: usize,
}

impl RegressionResult {
    /// `intercept + x * coefficients`.
    pub fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        Col::from_fn(x.nrows(), |i| {
            let mut pred = self.intercept;
            for j in 0..x.ncols() {
                pred += x[(i, j)] * self.coefficients[j];
            }
            pred
        })
    }
}
