//! Prediction error metrics.
//!
//! All functions take the observed values first and the predictions second
//! and assume both vectors have the same, non-zero length.

use crate::utils::mean;
use faer::Col;

/// Coefficient of determination: `1 - SSres / SStot`.
///
/// `SStot` is taken around the mean of `y_true`. The value is not clamped,
/// so predictions worse than the mean give a negative R². A constant
/// `y_true` yields NaN (or -inf).
pub fn r_squared(y_true: &Col<f64>, y_pred: &Col<f64>) -> f64 {
    let y_mean = mean(y_true);
    let tss: f64 = y_true.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
    let rss: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&yi, &pi)| (yi - pi).powi(2))
        .sum();
    1.0 - rss / tss
}

/// Root mean squared error with divisor n.
pub fn rmse(y_true: &Col<f64>, y_pred: &Col<f64>) -> f64 {
    let n = y_true.nrows() as f64;
    let rss: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&yi, &pi)| (yi - pi).powi(2))
        .sum();
    (rss / n).sqrt()
}

/// Mean absolute error.
pub fn mae(y_true: &Col<f64>, y_pred: &Col<f64>) -> f64 {
    let n = y_true.nrows() as f64;
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&yi, &pi)| (yi - pi).abs())
        .sum::<f64>()
        / n
}

/// R², RMSE and MAE of one prediction set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    pub r2: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl ErrorSummary {
    pub fn compute(y_true: &Col<f64>, y_pred: &Col<f64>) -> Self {
        Self {
            r2: r_squared(y_true, y_pred),
            rmse: rmse(y_true, y_pred),
            mae: mae(y_true, y_pred),
        }
    }
}
