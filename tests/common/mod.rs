//! Common test utilities and data generators.

#![allow(dead_code)]

use faer::{Col, Mat};
use maecce::core::{StudyOptions, ZeroVariancePolicy};
use maecce::datasets::{make_regression, train_test_split, RegressionSpec};
use maecce::evaluation::PreparedData;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Generate simple linear data: y = x * beta + intercept + noise, with
/// standard-normal features and `beta = [1, 2, ..., n_features]`.
pub fn generate_linear_data(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>, Col<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let true_coefficients = Col::from_fn(n_features, |j| (j + 1) as f64);

    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);
    for i in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = rng.sample::<f64, _>(StandardNormal);
            yi += x[(i, j)] * true_coefficients[j];
        }
        y[i] = yi + noise_std * rng.sample::<f64, _>(StandardNormal);
    }

    (x, y, true_coefficients)
}

/// Options for a study small enough to run in a unit test.
pub fn small_study_options(n_permutations: usize) -> StudyOptions {
    StudyOptions::builder()
        .n_train(40)
        .n_test(200)
        .n_features(10)
        .n_informative(5)
        .n_permutations(n_permutations)
        .max_components(6)
        .permutation_seed(2024)
        .plot_path(None)
        .build()
        .expect("valid options")
}

/// Generate, split and scale a synthetic dataset.
pub fn prepared_data(
    n_train: usize,
    n_test: usize,
    n_features: usize,
    max_components: usize,
) -> PreparedData {
    let spec = RegressionSpec::new(n_train + n_test, n_features, n_features.min(10), 30.0, 7);
    let data = make_regression(&spec).expect("dataset");
    let split = train_test_split(&data.x, &data.y, n_test, 0).expect("split");
    PreparedData::from_split(&split, ZeroVariancePolicy::Error, max_components).expect("scaling")
}

/// Sample mean and standard deviation (n - 1) of one matrix column.
pub fn column_moments(x: &Mat<f64>, j: usize) -> (f64, f64) {
    let n = x.nrows() as f64;
    let mean = (0..x.nrows()).map(|i| x[(i, j)]).sum::<f64>() / n;
    let var = (0..x.nrows()).map(|i| (x[(i, j)] - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}
