//! K-fold partitioning and out-of-fold prediction.

use super::SelectionError;
use crate::solvers::{FittedRegressor, Regressor};
use crate::utils::{select_entries, select_rows};
use faer::{Col, Mat};

/// One train/validation partition of the sample indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Contiguous, unshuffled k-fold splitter.
///
/// Sample order is preserved: fold `f` holds a consecutive block of indices,
/// and the first `n % k` folds are one sample larger than the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Partition `0..n_samples` into `n_splits` folds.
    pub fn split(&self, n_samples: usize) -> Result<Vec<Fold>, SelectionError> {
        let k = self.n_splits;
        if k < 2 || k > n_samples {
            return Err(SelectionError::InvalidFoldCount {
                n_folds: k,
                n_samples,
            });
        }

        let base = n_samples / k;
        let extra = n_samples % k;

        let mut folds = Vec::with_capacity(k);
        let mut start = 0;
        for f in 0..k {
            let size = base + usize::from(f < extra);
            let stop = start + size;
            let test: Vec<usize> = (start..stop).collect();
            let train: Vec<usize> = (0..start).chain(stop..n_samples).collect();
            folds.push(Fold { train, test });
            start = stop;
        }
        Ok(folds)
    }
}

/// Out-of-fold predictions: every sample is predicted by a model fit on the
/// folds that do not contain it.
pub fn cross_val_predict<R: Regressor>(
    model: &R,
    x: &Mat<f64>,
    y: &Col<f64>,
    kfold: &KFold,
) -> Result<Col<f64>, SelectionError> {
    let n = x.nrows();
    if y.nrows() != n {
        return Err(SelectionError::DimensionMismatch {
            x_rows: n,
            y_len: y.nrows(),
        });
    }

    let mut predictions = Col::zeros(n);
    for fold in kfold.split(n)? {
        let x_train = select_rows(x, &fold.train);
        let y_train = select_entries(y, &fold.train);
        let x_test = select_rows(x, &fold.test);

        let fitted = model.fit(&x_train, &y_train)?;
        let fold_predictions = fitted.predict(&x_test);
        for (k, &row) in fold.test.iter().enumerate() {
            predictions[row] = fold_predictions[k];
        }
    }
    Ok(predictions)
}
