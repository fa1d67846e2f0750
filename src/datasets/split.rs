//! Train/test partitioning.

use super::DataError;
use crate::utils::{select_entries, select_rows};
use faer::{Col, Mat};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Disjoint training and test partitions of a dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Mat<f64>,
    pub x_test: Mat<f64>,
    pub y_train: Col<f64>,
    pub y_test: Col<f64>,
    /// Row indices (into the full dataset) of the training samples.
    pub train_indices: Vec<usize>,
    /// Row indices (into the full dataset) of the test samples.
    pub test_indices: Vec<usize>,
}

/// Shuffle the rows with a seeded generator and hold out `test_size` of them.
///
/// The first `test_size` rows of the permutation form the test set and the
/// remainder the training set, so no sample lands in both.
pub fn train_test_split(
    x: &Mat<f64>,
    y: &Col<f64>,
    test_size: usize,
    seed: u64,
) -> Result<TrainTestSplit, DataError> {
    let n = x.nrows();
    if n != y.nrows() {
        return Err(DataError::DimensionMismatch {
            x_rows: n,
            y_len: y.nrows(),
        });
    }
    if test_size == 0 || test_size >= n {
        return Err(DataError::InvalidTestSize {
            test_size,
            n_samples: n,
        });
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let test_indices = order[..test_size].to_vec();
    let train_indices = order[test_size..].to_vec();

    Ok(TrainTestSplit {
        x_train: select_rows(x, &train_indices),
        x_test: select_rows(x, &test_indices),
        y_train: select_entries(y, &train_indices),
        y_test: select_entries(y, &test_indices),
        train_indices,
        test_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(n: usize) -> (Mat<f64>, Col<f64>) {
        let x = Mat::from_fn(n, 2, |i, j| (i * 10 + j) as f64);
        let y = Col::from_fn(n, |i| i as f64);
        (x, y)
    }

    #[test]
    fn test_sizes() {
        let (x, y) = data(30);
        let split = train_test_split(&x, &y, 10, 0).unwrap();
        assert_eq!(split.x_train.nrows(), 20);
        assert_eq!(split.x_test.nrows(), 10);
        assert_eq!(split.y_train.nrows(), 20);
        assert_eq!(split.y_test.nrows(), 10);
    }

    #[test]
    fn test_disjoint_and_covering() {
        let (x, y) = data(30);
        let split = train_test_split(&x, &y, 7, 0).unwrap();

        let mut all: Vec<usize> = split
            .train_indices
            .iter()
            .chain(split.test_indices.iter())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_rows_stay_aligned() {
        let (x, y) = data(12);
        let split = train_test_split(&x, &y, 4, 3).unwrap();
        for (k, &row) in split.test_indices.iter().enumerate() {
            assert_eq!(split.y_test[k], row as f64);
            assert_eq!(split.x_test[(k, 1)], (row * 10 + 1) as f64);
        }
    }

    #[test]
    fn test_seeded_split_is_deterministic() {
        let (x, y) = data(20);
        let a = train_test_split(&x, &y, 5, 0).unwrap();
        let b = train_test_split(&x, &y, 5, 0).unwrap();
        assert_eq!(a.test_indices, b.test_indices);
    }

    #[test]
    fn test_test_size_too_large() {
        let (x, y) = data(5);
        assert!(matches!(
            train_test_split(&x, &y, 5, 0),
            Err(DataError::InvalidTestSize { .. })
        ));
        assert!(matches!(
            train_test_split(&x, &y, 0, 0),
            Err(DataError::InvalidTestSize { .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let (x, _) = data(5);
        let y = Col::zeros(4);
        assert!(matches!(
            train_test_split(&x, &y, 1, 0),
            Err(DataError::DimensionMismatch { .. })
        ));
    }
}
