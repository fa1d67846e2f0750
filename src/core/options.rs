//! Study options and configuration.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use thiserror::Error;

/// How the scaler treats a training column with zero sample variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVariancePolicy {
    /// Refuse to fit the scaler (default).
    #[default]
    Error,
    /// Divide by the zero standard deviation anyway; the column becomes NaN/inf.
    Propagate,
    /// Center the column but leave its scale untouched.
    Unscaled,
}

/// Which permuted-run MAE column the MAEcce diagnostic subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullMaeSource {
    /// Cross-validated MAE of each permuted run (default).
    #[default]
    CrossValidated,
    /// In-sample MAE of each permuted run.
    Fitted,
}

/// Configuration of one MAEcce study.
///
/// Every field has a default matching the reference study: 50 training
/// samples, 10000 test samples, 30 features (10 informative, noise 30),
/// 100 y-randomizations, up to 20 PLS components and 5-fold cross-validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyOptions {
    /// Number of training samples.
    pub n_train: usize,
    /// Number of test samples.
    pub n_test: usize,
    /// Number of features in the synthetic dataset.
    pub n_features: usize,
    /// Number of features with a non-zero true coefficient.
    pub n_informative: usize,
    /// Standard deviation of the Gaussian noise added to the target.
    pub noise: f64,
    /// Number of y-randomization repetitions.
    pub n_permutations: usize,
    /// Upper bound on the number of PLS components tried.
    pub max_components: usize,
    /// Number of cross-validation folds.
    pub n_folds: usize,
    /// Seed for the dataset generator. `None` derives it from `n_train + n_features`.
    pub dataset_seed: Option<u64>,
    /// Seed for the train/test split.
    pub split_seed: u64,
    /// Seed for y-randomization. `None` draws from OS entropy on every run.
    pub permutation_seed: Option<u64>,
    /// Zero-variance handling in the scaler.
    pub zero_variance: ZeroVariancePolicy,
    /// Permuted MAE column used by the diagnostic.
    pub null_mae_source: NullMaeSource,
    /// Number of histogram bins.
    pub histogram_bins: usize,
    /// Vertical position of the test-MAE marker.
    pub marker_height: f64,
    /// Where to write the histogram. `None` skips plotting; in a config file
    /// an empty string (`plot_path = ""`) does the same.
    #[serde(deserialize_with = "deserialize_plot_path")]
    pub plot_path: Option<PathBuf>,
}

fn deserialize_plot_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = PathBuf::deserialize(deserializer)?;
    Ok(if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    })
}

impl Default for StudyOptions {
    fn default() -> Self {
        Self {
            n_train: 50,
            n_test: 10_000,
            n_features: 30,
            n_informative: 10,
            noise: 30.0,
            n_permutations: 100,
            max_components: 20,
            n_folds: 5,
            dataset_seed: None,
            split_seed: 0,
            permutation_seed: None,
            zero_variance: ZeroVariancePolicy::Error,
            null_mae_source: NullMaeSource::CrossValidated,
            histogram_bins: 30,
            marker_height: 0.2,
            plot_path: Some(PathBuf::from("maecce.png")),
        }
    }
}

/// Errors that can occur when validating study options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("n_train must be at least 2, got {0}")]
    InvalidTrainSize(usize),
    #[error("n_test must be at least 1, got {0}")]
    InvalidTestSize(usize),
    #[error("n_features must be at least 1, got {0}")]
    InvalidFeatureCount(usize),
    #[error("n_informative must be in [1, n_features = {n_features}], got {n_informative}")]
    InvalidInformativeCount {
        n_informative: usize,
        n_features: usize,
    },
    #[error("noise must be finite and non-negative, got {0}")]
    InvalidNoise(f64),
    #[error("max_components must be at least 1, got {0}")]
    InvalidMaxComponents(usize),
    #[error("n_folds must be in [2, n_train = {n_train}], got {n_folds}")]
    InvalidFoldCount { n_folds: usize, n_train: usize },
    #[error("histogram_bins must be at least 1, got {0}")]
    InvalidHistogramBins(usize),
    #[error("marker_height must be finite, got {0}")]
    InvalidMarkerHeight(f64),
}

impl StudyOptions {
    /// Create a new builder for study options.
    pub fn builder() -> StudyOptionsBuilder {
        StudyOptionsBuilder::default()
    }

    /// Seed used for the synthetic dataset.
    pub fn effective_dataset_seed(&self) -> u64 {
        self.dataset_seed
            .unwrap_or((self.n_train + self.n_features) as u64)
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.n_train < 2 {
            return Err(OptionsError::InvalidTrainSize(self.n_train));
        }
        if self.n_test < 1 {
            return Err(OptionsError::InvalidTestSize(self.n_test));
        }
        if self.n_features < 1 {
            return Err(OptionsError::InvalidFeatureCount(self.n_features));
        }
        if self.n_informative < 1 || self.n_informative > self.n_features {
            return Err(OptionsError::InvalidInformativeCount {
                n_informative: self.n_informative,
                n_features: self.n_features,
            });
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(OptionsError::InvalidNoise(self.noise));
        }
        if self.max_components < 1 {
            return Err(OptionsError::InvalidMaxComponents(self.max_components));
        }
        if self.n_folds < 2 || self.n_folds > self.n_train {
            return Err(OptionsError::InvalidFoldCount {
                n_folds: self.n_folds,
                n_train: self.n_train,
            });
        }
        if self.histogram_bins < 1 {
            return Err(OptionsError::InvalidHistogramBins(self.histogram_bins));
        }
        if !self.marker_height.is_finite() {
            return Err(OptionsError::InvalidMarkerHeight(self.marker_height));
        }
        Ok(())
    }
}

/// Builder for `StudyOptions`.
#[derive(Debug, Clone, Default)]
pub struct StudyOptionsBuilder {
    options: StudyOptions,
}

impl StudyOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of training samples.
    pub fn n_train(mut self, n: usize) -> Self {
        self.options.n_train = n;
        self
    }

    /// Set the number of test samples.
    pub fn n_test(mut self, n: usize) -> Self {
        self.options.n_test = n;
        self
    }

    /// Set the number of features.
    pub fn n_features(mut self, n: usize) -> Self {
        self.options.n_features = n;
        self
    }

    /// Set the number of informative features.
    pub fn n_informative(mut self, n: usize) -> Self {
        self.options.n_informative = n;
        self
    }

    /// Set the noise standard deviation.
    pub fn noise(mut self, noise: f64) -> Self {
        self.options.noise = noise;
        self
    }

    /// Set the number of y-randomization repetitions.
    pub fn n_permutations(mut self, n: usize) -> Self {
        self.options.n_permutations = n;
        self
    }

    /// Set the maximum number of PLS components.
    pub fn max_components(mut self, n: usize) -> Self {
        self.options.max_components = n;
        self
    }

    /// Set the number of cross-validation folds.
    pub fn n_folds(mut self, n: usize) -> Self {
        self.options.n_folds = n;
        self
    }

    /// Set the dataset seed.
    pub fn dataset_seed(mut self, seed: u64) -> Self {
        self.options.dataset_seed = Some(seed);
        self
    }

    /// Set the train/test split seed.
    pub fn split_seed(mut self, seed: u64) -> Self {
        self.options.split_seed = seed;
        self
    }

    /// Fix the y-randomization seed, making the null table reproducible.
    pub fn permutation_seed(mut self, seed: u64) -> Self {
        self.options.permutation_seed = Some(seed);
        self
    }

    /// Set the zero-variance policy of the scaler.
    pub fn zero_variance(mut self, policy: ZeroVariancePolicy) -> Self {
        self.options.zero_variance = policy;
        self
    }

    /// Set which permuted MAE column the diagnostic uses.
    pub fn null_mae_source(mut self, source: NullMaeSource) -> Self {
        self.options.null_mae_source = source;
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.options.histogram_bins = bins;
        self
    }

    /// Set the vertical position of the test-MAE marker.
    pub fn marker_height(mut self, height: f64) -> Self {
        self.options.marker_height = height;
        self
    }

    /// Set the plot output path; `None` disables plotting.
    pub fn plot_path(mut self, path: Option<PathBuf>) -> Self {
        self.options.plot_path = path;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<StudyOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> StudyOptions {
        self.options
    }
}
