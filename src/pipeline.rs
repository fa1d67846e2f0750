//! The end-to-end MAEcce study.
//!
//! generate data -> split -> autoscale -> select and fit -> y-randomize ->
//! MAEcce -> histogram.

use crate::core::{NullTable, OptionsError, Statistics, StudyOptions};
use crate::datasets::{make_regression, train_test_split, DataError, RegressionSpec};
use crate::diagnostics::{maecce, NullSummary, YRandomization};
use crate::evaluation::{evaluate, PreparedData};
use crate::model_selection::{ComponentSelection, KFold, SelectionError};
use crate::plot::render_histogram;
use crate::preprocessing::ScalerError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Any failure of a study run.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("invalid options: {0}")]
    Options(#[from] OptionsError),

    #[error("data generation failed: {0}")]
    Data(#[from] DataError),

    #[error("scaling failed: {0}")]
    Scaler(#[from] ScalerError),

    #[error("model selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("cannot read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load study options from a TOML file. Missing keys keep their defaults.
pub fn load_options(path: &Path) -> Result<StudyOptions, StudyError> {
    let text = fs::read_to_string(path).map_err(|source| StudyError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let options: StudyOptions = toml::from_str(&text).map_err(|source| StudyError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    options.validate()?;
    Ok(options)
}

/// Everything a study run produces.
#[derive(Debug, Clone)]
pub struct StudyReport {
    /// Component selection on the true target.
    pub selection: ComponentSelection,
    /// Statistics of the true model.
    pub statistics: Statistics,
    /// One row per y-randomization.
    pub null_table: NullTable,
    /// MAEcce per y-randomization.
    pub maecce: Vec<f64>,
    pub summary: Option<NullSummary>,
    /// Histogram location, when one was written. A drawing failure is
    /// logged and leaves this empty.
    pub plot_path: Option<PathBuf>,
}

/// A configured MAEcce study.
#[derive(Debug, Clone)]
pub struct Study {
    options: StudyOptions,
}

impl Study {
    pub fn new(options: StudyOptions) -> Result<Self, StudyError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &StudyOptions {
        &self.options
    }

    /// Generate, split and autoscale the dataset.
    pub fn prepare(&self) -> Result<PreparedData, StudyError> {
        let opts = &self.options;
        let spec = RegressionSpec::new(
            opts.n_train + opts.n_test,
            opts.n_features,
            opts.n_informative,
            opts.noise,
            opts.effective_dataset_seed(),
        );
        let dataset = make_regression(&spec)?;
        let split = train_test_split(&dataset.x, &dataset.y, opts.n_test, opts.split_seed)?;
        let data = PreparedData::from_split(&split, opts.zero_variance, opts.max_components)?;

        log::info!(
            "Prepared {} training and {} test samples with {} features; trying 1..={} components",
            data.x_train.nrows(),
            data.x_test.nrows(),
            data.x_train.ncols(),
            data.component_limit
        );
        Ok(data)
    }

    /// Run the full study.
    ///
    /// `on_progress(i, n)` is called before each y-randomization.
    pub fn run<F>(&self, on_progress: F) -> Result<StudyReport, StudyError>
    where
        F: FnMut(usize, usize),
    {
        let start = Instant::now();
        let opts = &self.options;
        let data = self.prepare()?;
        let kfold = KFold::new(opts.n_folds);

        let truth = evaluate(&data, &data.y_train_scaled, &kfold)?;
        log::info!(
            "Selected {} PLS components (cross-validated MAE {:.4})",
            truth.selection.selected,
            truth.selection.best_cv_mae()
        );
        if !truth.statistics.is_finite() {
            log::warn!("Model statistics contain non-finite values: {:?}", truth.statistics);
        }

        log::info!("Starting {} y-randomizations", opts.n_permutations);
        let null_table = YRandomization::new(opts.n_permutations)
            .with_seed(opts.permutation_seed)
            .run(&data, &kfold, on_progress)?;

        let values = maecce(&truth.statistics, &null_table, opts.null_mae_source);
        let summary = NullSummary::compute(&values, truth.statistics.mae_pred);

        let plot_path = match opts.plot_path {
            Some(_) if values.is_empty() => {
                log::warn!("No y-randomizations were run; skipping the histogram");
                None
            }
            Some(ref path) => match render_histogram(
                path,
                &values,
                truth.statistics.mae_pred,
                opts.histogram_bins,
                opts.marker_height,
            ) {
                Ok(()) => Some(path.clone()),
                Err(e) => {
                    log::warn!("Could not write histogram to {}: {}", path.display(), e);
                    None
                }
            },
            None => None,
        };

        log::info!("Study finished in {:.2?}", start.elapsed());

        Ok(StudyReport {
            selection: truth.selection,
            statistics: truth.statistics,
            null_table,
            maecce: values,
            summary,
            plot_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_options() -> StudyOptions {
        StudyOptions::builder()
            .n_train(40)
            .n_test(60)
            .n_features(8)
            .n_informative(4)
            .n_permutations(3)
            .max_components(5)
            .permutation_seed(17)
            .plot_path(None)
            .build()
            .unwrap()
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = StudyOptions::builder().n_folds(0).build_unchecked();
        assert!(matches!(Study::new(options), Err(StudyError::Options(_))));
    }

    #[test]
    fn test_run_small_study() {
        let study = Study::new(small_options()).unwrap();
        let report = study.run(|_, _| {}).unwrap();

        assert_eq!(report.null_table.len(), 3);
        assert_eq!(report.maecce.len(), 3);
        assert!(report.statistics.is_finite());
        assert!(report.summary.is_some());
        assert!(report.plot_path.is_none());
        assert!((1..=5).contains(&report.selection.selected));
    }

    #[test]
    fn test_no_permutations_skips_histogram() {
        let mut options = small_options();
        options.n_permutations = 0;
        options.plot_path = Some(PathBuf::from("unused.png"));

        let report = Study::new(options).unwrap().run(|_, _| {}).unwrap();
        assert!(report.maecce.is_empty());
        assert!(report.plot_path.is_none());
    }

    #[test]
    fn test_histogram_written() {
        let path = std::env::temp_dir().join(format!("maecce-run-{}.svg", std::process::id()));
        let mut options = small_options();
        options.plot_path = Some(path.clone());

        let report = Study::new(options).unwrap().run(|_, _| {}).unwrap();
        let written = path.exists();
        fs::remove_file(&path).ok();

        assert!(written);
        assert_eq!(report.plot_path, Some(path));
    }

    #[test]
    fn test_unwritable_histogram_keeps_report() {
        let mut options = small_options();
        options.plot_path = Some(PathBuf::from("/nonexistent_maecce_dir/hist.png"));

        let report = Study::new(options).unwrap().run(|_, _| {}).unwrap();

        assert!(report.plot_path.is_none());
        assert_eq!(report.maecce.len(), 3);
        assert!(report.statistics.is_finite());
        assert!(report.summary.is_some());
    }

    #[test]
    fn test_load_options_missing_file() {
        let result = load_options(Path::new("/nonexistent/maecce.toml"));
        assert!(matches!(result, Err(StudyError::ConfigRead { .. })));
    }

    #[test]
    fn test_load_options_from_file() {
        let path = std::env::temp_dir().join(format!("maecce-config-{}.toml", std::process::id()));
        fs::write(&path, "n_train = 80\nn_permutations = 7\n").unwrap();

        let options = load_options(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(options.n_train, 80);
        assert_eq!(options.n_permutations, 7);
        assert_eq!(options.n_features, 30);
    }

    #[test]
    fn test_load_options_invalid_values() {
        let path = std::env::temp_dir().join(format!("maecce-bad-{}.toml", std::process::id()));
        fs::write(&path, "n_folds = 1\n").unwrap();

        let result = load_options(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(StudyError::Options(_))));
    }
}
