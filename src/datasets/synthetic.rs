//! Synthetic linear regression datasets.
//!
//! The generator draws a standard-normal design matrix, gives a subset of
//! the features non-zero coefficients and adds Gaussian noise to the linear
//! response. Rows and columns are shuffled afterwards so that informative
//! features are not grouped at the front.

use super::DataError;
use faer::{Col, Mat};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A generated dataset together with its ground-truth coefficients.
#[derive(Debug, Clone)]
pub struct RegressionDataset {
    /// Feature matrix (n_samples x n_features).
    pub x: Mat<f64>,
    /// Response vector.
    pub y: Col<f64>,
    /// True coefficients, zero for non-informative features.
    pub coefficients: Col<f64>,
}

/// Parameters of [`make_regression`].
#[derive(Debug, Clone, Copy)]
pub struct RegressionSpec {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_informative: usize,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
    /// Constant added to every response.
    pub bias: f64,
    pub seed: u64,
}

impl RegressionSpec {
    /// Spec with zero bias.
    pub fn new(
        n_samples: usize,
        n_features: usize,
        n_informative: usize,
        noise: f64,
        seed: u64,
    ) -> Self {
        Self {
            n_samples,
            n_features,
            n_informative,
            noise,
            bias: 0.0,
            seed,
        }
    }
}

/// Generate a random linear regression problem.
///
/// `y = X * coef + bias + noise * e` with `X` and `e` standard normal and the
/// informative coefficients drawn from `100 * U(0, 1)`. The same seed always
/// produces the same dataset.
pub fn make_regression(spec: &RegressionSpec) -> Result<RegressionDataset, DataError> {
    let RegressionSpec {
        n_samples,
        n_features,
        n_informative,
        noise,
        bias,
        seed,
    } = *spec;

    if n_samples == 0 || n_features == 0 {
        return Err(DataError::EmptyDataset {
            n_samples,
            n_features,
        });
    }
    if n_informative > n_features {
        return Err(DataError::TooManyInformative {
            n_informative,
            n_features,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let mut x_raw = Mat::zeros(n_samples, n_features);
    for i in 0..n_samples {
        for j in 0..n_features {
            x_raw[(i, j)] = rng.sample::<f64, _>(StandardNormal);
        }
    }

    let mut coef_raw = Col::zeros(n_features);
    for j in 0..n_informative {
        coef_raw[j] = 100.0 * rng.random::<f64>();
    }

    let mut y_raw = Col::zeros(n_samples);
    for i in 0..n_samples {
        let mut yi = bias;
        for j in 0..n_informative {
            yi += x_raw[(i, j)] * coef_raw[j];
        }
        if noise > 0.0 {
            yi += noise * rng.sample::<f64, _>(StandardNormal);
        }
        y_raw[i] = yi;
    }

    let mut row_order: Vec<usize> = (0..n_samples).collect();
    row_order.shuffle(&mut rng);
    let mut col_order: Vec<usize> = (0..n_features).collect();
    col_order.shuffle(&mut rng);

    let x = Mat::from_fn(n_samples, n_features, |i, j| {
        x_raw[(row_order[i], col_order[j])]
    });
    let y = Col::from_fn(n_samples, |i| y_raw[row_order[i]]);
    let coefficients = Col::from_fn(n_features, |j| coef_raw[col_order[j]]);

    log::debug!(
        "Generated regression dataset: {} samples, {} features ({} informative), noise {}",
        n_samples,
        n_features,
        n_informative,
        noise
    );

    Ok(RegressionDataset { x, y, coefficients })
}
