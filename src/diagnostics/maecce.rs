//! The MAEcce diagnostic and a summary of its null distribution.
//!
//! `MAEcce[i] = (train MAE + baseline MAE) - null MAE[i]`. If the true model
//! is no better than chance, the true test MAE sits inside the MAEcce
//! distribution; a test MAE far below it indicates a real relationship.

use crate::core::{NullColumn, NullMaeSource, NullTable, Statistics};
use statrs::statistics::{Data, OrderStatistics, Statistics as _};

/// Compute MAEcce for every permutation in `null`.
pub fn maecce(statistics: &Statistics, null: &NullTable, source: NullMaeSource) -> Vec<f64> {
    let column = match source {
        NullMaeSource::CrossValidated => NullColumn::MaeCv,
        NullMaeSource::Fitted => NullColumn::Mae,
    };
    let offset = statistics.mae + statistics.mae_mean;
    null.column(column).into_iter().map(|v| offset - v).collect()
}

/// Descriptive statistics of the MAEcce values relative to the test MAE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, NaN for a single value.
    pub std_dev: f64,
    pub p05: f64,
    pub median: f64,
    pub p95: f64,
    /// True test-set MAE the distribution is compared against.
    pub test_mae: f64,
    /// Share of MAEcce values at or below the test MAE.
    pub fraction_below_test: f64,
    /// `(test_mae - mean) / std_dev`; `None` without a positive spread.
    pub test_z_score: Option<f64>,
}

impl NullSummary {
    /// Summarize `values`; `None` when there are no values.
    pub fn compute(values: &[f64], test_mae: f64) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mean = values.iter().mean();
        let std_dev = if values.len() > 1 {
            values.iter().std_dev()
        } else {
            f64::NAN
        };
        let test_z_score = (std_dev > 0.0).then(|| (test_mae - mean) / std_dev);

        let mut data = Data::new(values.to_vec());
        let p05 = data.quantile(0.05);
        let median = data.quantile(0.5);
        let p95 = data.quantile(0.95);

        let below = values.iter().filter(|&&v| v <= test_mae).count();

        Some(Self {
            count: values.len(),
            mean,
            std_dev,
            p05,
            median,
            p95,
            test_mae,
            fraction_below_test: below as f64 / values.len() as f64,
            test_z_score,
        })
    }
}

impl std::fmt::Display for NullSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MAEcce (n = {})", self.count)?;
        writeln!(f, "  mean: {}", self.mean)?;
        writeln!(f, "  std: {}", self.std_dev)?;
        writeln!(f, "  5% / 50% / 95%: {} / {} / {}", self.p05, self.median, self.p95)?;
        writeln!(f, "MAEp: {}", self.test_mae)?;
        writeln!(f, "  fraction of MAEcce <= MAEp: {}", self.fraction_below_test)?;
        match self.test_z_score {
            Some(z) => writeln!(f, "  z-score of MAEp: {}", z),
            None => writeln!(f, "  z-score of MAEp: undefined"),
        }
    }
}
