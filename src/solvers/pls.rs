//! Partial Least Squares (PLS) regression solver.
//!
//! Implements PLS regression using the SIMPLS algorithm (de Jong, 1993).
//! PLS is particularly useful when predictors are highly collinear or when
//! there are more predictors than observations.
//!
//! # Algorithm
//!
//! SIMPLS maximizes the covariance between X scores and y directly, deflating
//! only the cross-product `X'y`. Scores are kept orthonormal, so the
//! coefficients are `B = R q` with `R` the X weights and `q` the y loadings.
//! For a single response it yields the same predictions as NIPALS PLS1.
//!
//! # References
//!
//! - de Jong, S. (1993). SIMPLS: an alternative approach to partial least squares regression.
//!   Chemometrics and Intelligent Laboratory Systems, 18, 251-263.

use crate::core::RegressionResult;
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{center_columns, center_vector};
use faer::{Col, Mat};

/// Norm below which no further component is extracted.
const TOLERANCE: f64 = 1e-10;

/// Partial Least Squares regression estimator.
///
/// X is centered and rescaled to unit variance inside every fit, so a model
/// fit inside a cross-validation fold uses that fold's statistics.
///
/// # Example
///
/// ```rust,ignore
/// use maecce::solvers::{FittedRegressor, PlsRegressor, Regressor};
/// use faer::{Col, Mat};
///
/// let x = Mat::from_fn(100, 10, |i, j| ((i * (j + 1)) as f64).sin());
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * x[(i, 0)]);
///
/// let fitted = PlsRegressor::new(3).fit(&x, &y)?;
/// let predictions = fitted.predict(&x);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlsRegressor {
    n_components: usize,
}

impl PlsRegressor {
    /// Create a new PLS regressor with the given number of components.
    pub fn new(n_components: usize) -> Self {
        Self { n_components }
    }

    /// Number of components requested.
    pub fn n_components(&self) -> usize {
        self.n_components
    }
}

/// Run SIMPLS on centered, scaled data.
///
/// Returns the coefficients on the scale of `x` and the number of components
/// that could actually be extracted.
fn simpls(x: &Mat<f64>, y: &Col<f64>, n_components: usize) -> (Col<f64>, usize) {
    let n = x.nrows();
    let p = x.ncols();

    // Orthonormal basis of the extracted x-loadings
    let mut basis: Vec<Col<f64>> = Vec::with_capacity(n_components);
    let mut coefficients = Col::zeros(p);

    // Cross-product s = X'y, deflated after every component
    let mut s = Col::from_fn(p, |j| (0..n).map(|i| x[(i, j)] * y[i]).sum::<f64>());

    for _ in 0..n_components {
        let mut r = s.clone();
        for v in &basis {
            let vtr: f64 = (0..p).map(|j| v[j] * r[j]).sum();
            for j in 0..p {
                r[j] -= v[j] * vtr;
            }
        }

        let r_norm = r.iter().map(|&v| v * v).sum::<f64>().sqrt();
        if r_norm < TOLERANCE {
            break;
        }

        // Score t = X r, normalized together with r so that X r = t
        let mut t = Col::from_fn(n, |i| (0..p).map(|j| x[(i, j)] * r[j]).sum::<f64>());
        let t_norm = t.iter().map(|&v| v * v).sum::<f64>().sqrt();
        if t_norm < TOLERANCE {
            break;
        }
        for i in 0..n {
            t[i] /= t_norm;
        }
        for j in 0..p {
            r[j] /= t_norm;
        }

        let q: f64 = (0..n).map(|i| y[i] * t[i]).sum();
        for j in 0..p {
            coefficients[j] += r[j] * q;
        }

        // v = X't orthogonalized against the previous loadings
        let mut v = Col::from_fn(p, |j| (0..n).map(|i| x[(i, j)] * t[i]).sum::<f64>());
        for prev in &basis {
            let overlap: f64 = (0..p).map(|j| prev[j] * v[j]).sum();
            for j in 0..p {
                v[j] -= prev[j] * overlap;
            }
        }
        let v_norm = v.iter().map(|&e| e * e).sum::<f64>().sqrt();
        if v_norm > TOLERANCE {
            for j in 0..p {
                v[j] /= v_norm;
            }
        }

        let vts: f64 = (0..p).map(|j| v[j] * s[j]).sum();
        for j in 0..p {
            s[j] -= v[j] * vts;
        }
        basis.push(v);
    }

    let extracted = basis.len();
    (coefficients, extracted)
}

impl Regressor for PlsRegressor {
    type Fitted = FittedPls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: n_samples,
                y_len: y.nrows(),
            });
        }
        if n_samples < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: n_samples,
            });
        }
        if self.n_components == 0 {
            return Err(RegressionError::NoComponents);
        }

        let n_components = self.n_components.min(n_samples.min(n_features));

        let (x_centered, x_means) = center_columns(x);
        let (y_centered, y_mean) = center_vector(y);

        // Constant columns keep a unit divisor
        let scales = Col::from_fn(n_features, |j| {
            let ss: f64 = (0..n_samples).map(|i| x_centered[(i, j)].powi(2)).sum();
            let std = (ss / (n_samples - 1) as f64).sqrt();
            if std > TOLERANCE {
                std
            } else {
                1.0
            }
        });
        let x_scaled = Mat::from_fn(n_samples, n_features, |i, j| x_centered[(i, j)] / scales[j]);

        let (scaled_coefficients, extracted) = simpls(&x_scaled, &y_centered, n_components);
        if extracted < n_components {
            log::debug!(
                "SIMPLS stopped after {} of {} components (residual covariance below tolerance)",
                extracted,
                n_components
            );
        }

        let coefficients = Col::from_fn(n_features, |j| scaled_coefficients[j] / scales[j]);
        let intercept = y_mean - (0..n_features).map(|j| x_means[j] * coefficients[j]).sum::<f64>();

        Ok(FittedPls {
            result: RegressionResult {
                coefficients,
                intercept,
                n_components: extracted,
            },
        })
    }
}

/// A fitted PLS regression model.
#[derive(Debug, Clone)]
pub struct FittedPls {
    result: RegressionResult,
}

impl FittedRegressor for FittedPls {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        self.result.predict(x)
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }
}
