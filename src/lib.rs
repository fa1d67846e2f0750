//! Y-randomization validity diagnostics for PLS regression.
//!
//! The crate runs a complete MAEcce study: it generates a synthetic linear
//! regression problem, autoscales it with training statistics, selects the
//! number of PLS components by cross-validated MAE, and compares the true
//! test-set MAE with the MAEcce values obtained from y-randomized refits.
//!
//! # Example
//!
//! ```rust,ignore
//! use maecce::prelude::*;
//!
//! let options = StudyOptions::builder()
//!     .n_permutations(20)
//!     .permutation_seed(1)
//!     .plot_path(None)
//!     .build()?;
//!
//! let report = Study::new(options)?.run(|i, n| println!("{i} / {n}"))?;
//! println!("{}", report.statistics);
//! ```

pub mod core;
pub mod datasets;
pub mod diagnostics;
pub mod evaluation;
pub mod model_selection;
pub mod pipeline;
pub mod plot;
pub mod preprocessing;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        NullColumn, NullMaeSource, NullRow, NullTable, Statistics, StudyOptions,
        StudyOptionsBuilder, ZeroVariancePolicy,
    };
    pub use crate::datasets::{make_regression, train_test_split, RegressionSpec};
    pub use crate::diagnostics::{maecce, NullSummary, YRandomization};
    pub use crate::evaluation::{evaluate, Evaluation, PreparedData};
    pub use crate::model_selection::{cross_val_predict, select_components, KFold};
    pub use crate::pipeline::{load_options, Study, StudyError, StudyReport};
    pub use crate::preprocessing::{StandardScaler, TargetScaler};
    pub use crate::solvers::{FittedPls, FittedRegressor, PlsRegressor, Regressor};
}

pub use crate::core::{Statistics, StudyOptions};
pub use crate::pipeline::{Study, StudyError, StudyReport};
