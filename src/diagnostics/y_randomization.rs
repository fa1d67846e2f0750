//! Y-randomization: refit against permuted targets to build a null table.
//!
//! Each repetition shuffles the standardized training target, reruns the
//! component selection and the final evaluation against the shuffled
//! labels, and records the training and cross-validation statistics. The
//! feature matrices and scalers are never refit.

use crate::core::NullTable;
use crate::evaluation::{evaluate, PreparedData};
use crate::model_selection::{KFold, SelectionError};
use crate::utils::select_entries;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Configuration of a y-randomization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YRandomization {
    n_permutations: usize,
    seed: Option<u64>,
}

impl YRandomization {
    /// Run `n_permutations` repetitions seeded from OS entropy.
    pub fn new(n_permutations: usize) -> Self {
        Self {
            n_permutations,
            seed: None,
        }
    }

    /// Use a fixed seed so the null table can be reproduced.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_permutations(&self) -> usize {
        self.n_permutations
    }

    /// Build the null table.
    ///
    /// `on_progress(i, n)` is called before repetition `i` (1-based) of `n`.
    pub fn run<F>(
        &self,
        data: &PreparedData,
        kfold: &KFold,
        mut on_progress: F,
    ) -> Result<NullTable, SelectionError>
    where
        F: FnMut(usize, usize),
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let n = data.y_train_scaled.nrows();
        let mut order: Vec<usize> = (0..n).collect();
        let mut table = NullTable::with_capacity(self.n_permutations);

        for i in 0..self.n_permutations {
            on_progress(i + 1, self.n_permutations);

            order.shuffle(&mut rng);
            let y_permuted = select_entries(&data.y_train_scaled, &order);

            let evaluation = evaluate(data, &y_permuted, kfold)?;
            let row = evaluation.statistics.null_row();
            if !row.as_array().iter().all(|v| v.is_finite()) {
                log::warn!("Permutation {} produced non-finite statistics: {:?}", i + 1, row);
            }
            log::debug!(
                "Permutation {}: {} components, MAE {:.4}, cross-validated MAE {:.4}",
                i + 1,
                evaluation.selection.selected,
                row.mae,
                row.mae_cv
            );

            table.push(row);
        }

        Ok(table)
    }
}
