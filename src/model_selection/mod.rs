//! Cross-validation and model selection.

mod components;
mod kfold;

pub use components::{component_limit, select_components, ComponentSelection};
pub use kfold::{cross_val_predict, Fold, KFold};

use crate::solvers::RegressionError;
use thiserror::Error;

/// Errors raised during cross-validation and component selection.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("n_folds must be in [2, {n_samples}], got {n_folds}")]
    InvalidFoldCount { n_folds: usize, n_samples: usize },

    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("no candidate component counts (feature matrix has rank 0 or max_components is 0)")]
    NoCandidates,

    #[error("every candidate produced a non-finite cross-validated MAE")]
    NoFiniteScore,

    #[error(transparent)]
    Regression(#[from] RegressionError),
}
