//! Summary statistics of a fitted model and the y-randomization null table.

use std::fmt;

/// The eleven summary statistics of one evaluated model.
///
/// All errors are in the original target units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// R² of in-sample training predictions.
    pub r2: f64,
    /// RMSE of in-sample training predictions.
    pub rmse: f64,
    /// MAE of in-sample training predictions.
    pub mae: f64,
    /// R² of cross-validated training predictions.
    pub r2_cv: f64,
    /// RMSE of cross-validated training predictions.
    pub rmse_cv: f64,
    /// MAE of cross-validated training predictions.
    pub mae_cv: f64,
    /// R² of test-set predictions.
    pub r2_pred: f64,
    /// RMSE of test-set predictions.
    pub rmse_pred: f64,
    /// MAE of test-set predictions.
    pub mae_pred: f64,
    /// RMSE of always predicting the training mean.
    pub rmse_mean: f64,
    /// MAE of always predicting the training mean.
    pub mae_mean: f64,
}

impl Statistics {
    /// Report labels, in `as_array` order.
    pub const LABELS: [&'static str; 11] = [
        "r2", "RMSE", "MAE", "r2cv", "RMSEcv", "MAEcv", "r2p", "RMSEp", "MAEp", "RMSEmean",
        "MAEmean",
    ];

    /// All statistics as a fixed-size array.
    pub fn as_array(&self) -> [f64; 11] {
        [
            self.r2,
            self.rmse,
            self.mae,
            self.r2_cv,
            self.rmse_cv,
            self.mae_cv,
            self.r2_pred,
            self.rmse_pred,
            self.mae_pred,
            self.rmse_mean,
            self.mae_mean,
        ]
    }

    /// True when every statistic is finite.
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }

    /// The six statistics recorded for a y-randomization run.
    pub fn null_row(&self) -> NullRow {
        NullRow {
            r2: self.r2,
            rmse: self.rmse,
            mae: self.mae,
            r2_cv: self.r2_cv,
            rmse_cv: self.rmse_cv,
            mae_cv: self.mae_cv,
        }
    }
}

impl fmt::Display for Statistics {
    /// Labeled block, one statistic per line, groups separated by blank lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.as_array();
        for (i, (label, value)) in Self::LABELS.iter().zip(values.iter()).enumerate() {
            if i > 0 && i % 3 == 0 {
                writeln!(f)?;
            }
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

/// Training and cross-validation statistics of one permuted run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullRow {
    pub r2: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2_cv: f64,
    pub rmse_cv: f64,
    pub mae_cv: f64,
}

impl NullRow {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.r2,
            self.rmse,
            self.mae,
            self.r2_cv,
            self.rmse_cv,
            self.mae_cv,
        ]
    }
}

/// Column selector for [`NullTable::column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullColumn {
    R2,
    Rmse,
    Mae,
    R2Cv,
    RmseCv,
    MaeCv,
}

impl NullColumn {
    fn index(self) -> usize {
        match self {
            NullColumn::R2 => 0,
            NullColumn::Rmse => 1,
            NullColumn::Mae => 2,
            NullColumn::R2Cv => 3,
            NullColumn::RmseCv => 4,
            NullColumn::MaeCv => 5,
        }
    }
}

/// Append-only table of y-randomization statistics, one row per permutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NullTable {
    rows: Vec<NullRow>,
}

impl NullTable {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            rows: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, row: NullRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[NullRow] {
        &self.rows
    }

    /// Extract one statistic across all permutations.
    pub fn column(&self, column: NullColumn) -> Vec<f64> {
        let idx = column.index();
        self.rows.iter().map(|row| row.as_array()[idx]).collect()
    }

    /// True when no entry of the table is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.as_array().iter().all(|v| v.is_finite()))
    }
}
