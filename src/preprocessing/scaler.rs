//! Autoscaling fitted on training data.
//!
//! Both scalers record the training mean and the sample standard deviation
//! (denominator n - 1) once, then apply that fixed transform to any data
//! passed in later. Test data never contributes to the parameters.

use crate::core::ZeroVariancePolicy;
use crate::utils::{mean, sample_std};
use faer::{Col, Mat};
use thiserror::Error;

/// Errors raised by the scalers.
#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("insufficient observations: need at least 2, got {0}")]
    InsufficientObservations(usize),

    #[error("column {column} has zero variance")]
    ZeroVariance { column: usize },

    #[error("target has zero variance")]
    ZeroVarianceTarget,

    #[error("dimension mismatch: scaler was fit on {expected} columns, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Resolve the divisor for a column with standard deviation `std`.
///
/// Returns `None` when the policy rejects the column.
fn divisor(std: f64, policy: ZeroVariancePolicy) -> Option<f64> {
    if std > 0.0 {
        return Some(std);
    }
    match policy {
        ZeroVariancePolicy::Error => None,
        ZeroVariancePolicy::Propagate => Some(std),
        ZeroVariancePolicy::Unscaled => Some(1.0),
    }
}

/// Column-wise standardization of a feature matrix.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Col<f64>,
    scales: Col<f64>,
}

impl StandardScaler {
    /// Compute per-column mean and sample standard deviation of `x`.
    pub fn fit(x: &Mat<f64>, policy: ZeroVariancePolicy) -> Result<Self, ScalerError> {
        let n = x.nrows();
        let p = x.ncols();
        if n < 2 {
            return Err(ScalerError::InsufficientObservations(n));
        }

        let mut means = Col::zeros(p);
        let mut scales = Col::zeros(p);
        for j in 0..p {
            let column = Col::from_fn(n, |i| x[(i, j)]);
            means[j] = mean(&column);
            let std = sample_std(&column);
            scales[j] = match divisor(std, policy) {
                Some(d) => d,
                None => return Err(ScalerError::ZeroVariance { column: j }),
            };
            if std == 0.0 && policy == ZeroVariancePolicy::Propagate {
                log::warn!(
                    "Column {} has zero variance; its scaled values will be non-finite",
                    j
                );
            }
        }

        Ok(Self { means, scales })
    }

    /// Apply the fitted transform: `(x - mean) / std`.
    pub fn transform(&self, x: &Mat<f64>) -> Result<Mat<f64>, ScalerError> {
        if x.ncols() != self.means.nrows() {
            return Err(ScalerError::DimensionMismatch {
                expected: self.means.nrows(),
                got: x.ncols(),
            });
        }
        Ok(Mat::from_fn(x.nrows(), x.ncols(), |i, j| {
            (x[(i, j)] - self.means[j]) / self.scales[j]
        }))
    }

    /// Fit on `x` and return the scaled matrix alongside the scaler.
    pub fn fit_transform(
        x: &Mat<f64>,
        policy: ZeroVariancePolicy,
    ) -> Result<(Self, Mat<f64>), ScalerError> {
        let scaler = Self::fit(x, policy)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }

    pub fn means(&self) -> &Col<f64> {
        &self.means
    }

    /// Divisors applied to each column.
    pub fn scales(&self) -> &Col<f64> {
        &self.scales
    }
}

/// Standardization of a response vector, with its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetScaler {
    mean: f64,
    std: f64,
}

impl TargetScaler {
    pub fn fit(y: &Col<f64>, policy: ZeroVariancePolicy) -> Result<Self, ScalerError> {
        let n = y.nrows();
        if n < 2 {
            return Err(ScalerError::InsufficientObservations(n));
        }
        let std = divisor(sample_std(y), policy).ok_or(ScalerError::ZeroVarianceTarget)?;
        Ok(Self { mean: mean(y), std })
    }

    pub fn transform(&self, y: &Col<f64>) -> Col<f64> {
        Col::from_fn(y.nrows(), |i| (y[i] - self.mean) / self.std)
    }

    /// Map standardized values back to the original units: `z * std + mean`.
    pub fn inverse_transform(&self, z: &Col<f64>) -> Col<f64> {
        Col::from_fn(z.nrows(), |i| z[i] * self.std + self.mean)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}
