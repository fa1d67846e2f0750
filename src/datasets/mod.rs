//! Synthetic data generation and partitioning.

mod split;
mod synthetic;

pub use split::{train_test_split, TrainTestSplit};
pub use synthetic::{make_regression, RegressionDataset, RegressionSpec};

use thiserror::Error;

/// Errors raised while generating or partitioning data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset must be non-empty, got {n_samples} samples and {n_features} features")]
    EmptyDataset { n_samples: usize, n_features: usize },

    #[error("n_informative ({n_informative}) exceeds n_features ({n_features})")]
    TooManyInformative {
        n_informative: usize,
        n_features: usize,
    },

    #[error("test size must be in [1, {n_samples}), got {test_size}")]
    InvalidTestSize { test_size: usize, n_samples: usize },

    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },
}
