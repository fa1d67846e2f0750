//! Standardized training data and the final fit-and-evaluate step.
//!
//! [`PreparedData`] holds everything that stays fixed across the true run and
//! every y-randomization run: the scaled feature matrices, the scalers and
//! the candidate component limit. Only the scaled training target changes
//! between runs, and it is passed to [`evaluate`] explicitly.

use crate::core::{Statistics, ZeroVariancePolicy};
use crate::datasets::TrainTestSplit;
use crate::diagnostics::ErrorSummary;
use crate::model_selection::{
    component_limit, cross_val_predict, select_components, ComponentSelection, KFold,
    SelectionError,
};
use crate::preprocessing::{ScalerError, StandardScaler, TargetScaler};
use crate::solvers::{FittedRegressor, PlsRegressor, Regressor};
use crate::utils::mean;
use faer::{Col, Mat};

/// Training and test data after autoscaling with training statistics.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub x_train: Mat<f64>,
    pub x_test: Mat<f64>,
    /// Training target in original units.
    pub y_train: Col<f64>,
    /// Test target in original units.
    pub y_test: Col<f64>,
    /// Standardized training target.
    pub y_train_scaled: Col<f64>,
    pub features: StandardScaler,
    pub target: TargetScaler,
    /// Upper end of the candidate component range, `min(rank, max_components)`.
    pub component_limit: usize,
}

impl PreparedData {
    /// Fit the scalers on the training partition and scale both partitions.
    pub fn from_split(
        split: &TrainTestSplit,
        policy: ZeroVariancePolicy,
        max_components: usize,
    ) -> Result<Self, ScalerError> {
        let (features, x_train) = StandardScaler::fit_transform(&split.x_train, policy)?;
        let x_test = features.transform(&split.x_test)?;
        let target = TargetScaler::fit(&split.y_train, policy)?;
        let y_train_scaled = target.transform(&split.y_train);
        let component_limit = component_limit(&x_train, max_components);

        Ok(Self {
            x_train,
            x_test,
            y_train: split.y_train.clone(),
            y_test: split.y_test.clone(),
            y_train_scaled,
            features,
            target,
            component_limit,
        })
    }
}

/// Outcome of selecting, refitting and scoring one model.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub selection: ComponentSelection,
    pub statistics: Statistics,
}

/// Select the component count for `y_scaled`, refit, and compute the eleven
/// statistics in original units.
///
/// `y_scaled` is either the true standardized training target or a
/// permutation of it. The scalers and feature matrices in `data` are used
/// as-is.
pub fn evaluate(
    data: &PreparedData,
    y_scaled: &Col<f64>,
    kfold: &KFold,
) -> Result<Evaluation, SelectionError> {
    let selection = select_components(
        &data.x_train,
        y_scaled,
        &data.target,
        data.component_limit,
        kfold,
    )?;

    let model = PlsRegressor::new(selection.selected);
    let fitted = model.fit(&data.x_train, y_scaled)?;

    let y_true = data.target.inverse_transform(y_scaled);
    let estimated_train = data.target.inverse_transform(&fitted.predict(&data.x_train));
    let estimated_cv = data
        .target
        .inverse_transform(&cross_val_predict(&model, &data.x_train, y_scaled, kfold)?);
    let predicted_test = data.target.inverse_transform(&fitted.predict(&data.x_test));

    let train = ErrorSummary::compute(&y_true, &estimated_train);
    let cv = ErrorSummary::compute(&y_true, &estimated_cv);
    let test = ErrorSummary::compute(&data.y_test, &predicted_test);

    let y_mean = mean(&y_true);
    let baseline = ErrorSummary::compute(&y_true, &Col::from_fn(y_true.nrows(), |_| y_mean));

    let statistics = Statistics {
        r2: train.r2,
        rmse: train.rmse,
        mae: train.mae,
        r2_cv: cv.r2,
        rmse_cv: cv.rmse,
        mae_cv: cv.mae,
        r2_pred: test.r2,
        rmse_pred: test.rmse,
        mae_pred: test.mae,
        rmse_mean: baseline.rmse,
        mae_mean: baseline.mae,
    };

    Ok(Evaluation {
        selection,
        statistics,
    })
}
