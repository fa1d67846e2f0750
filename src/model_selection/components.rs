//! Choice of the number of PLS components by cross-validated MAE.

use super::{cross_val_predict, KFold, SelectionError};
use crate::diagnostics::mae;
use crate::preprocessing::TargetScaler;
use crate::solvers::{FittedRegressor, PlsRegressor, Regressor};
use crate::utils::matrix_rank;
use faer::{Col, Mat};

/// Cross-validation record of every candidate component count.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSelection {
    /// Component counts tried, `1..=limit`.
    pub candidates: Vec<usize>,
    /// Cross-validated MAE per candidate, original target units.
    pub cv_mae: Vec<f64>,
    /// In-sample MAE per candidate, original target units.
    pub fit_mae: Vec<f64>,
    /// The smallest count achieving the minimum cross-validated MAE.
    pub selected: usize,
}

impl ComponentSelection {
    /// Cross-validated MAE of the selected count.
    pub fn best_cv_mae(&self) -> f64 {
        self.cv_mae[self.selected - 1]
    }
}

/// Largest component count worth trying: `min(rank(x), max_components)`.
pub fn component_limit(x: &Mat<f64>, max_components: usize) -> usize {
    matrix_rank(x).min(max_components)
}

/// Index of the first minimum, ignoring NaN entries.
fn first_argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if values[b] <= v => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Evaluate every component count in `1..=limit` and pick the best.
///
/// `x` and `y_scaled` are the standardized training data. Predictions are
/// mapped back through `target` before the MAE is taken against the
/// un-scaled targets, so scores are in original units. Ties go to the
/// smaller model.
pub fn select_components(
    x: &Mat<f64>,
    y_scaled: &Col<f64>,
    target: &TargetScaler,
    limit: usize,
    kfold: &KFold,
) -> Result<ComponentSelection, SelectionError> {
    if limit == 0 {
        return Err(SelectionError::NoCandidates);
    }

    let y_true = target.inverse_transform(y_scaled);
    let candidates: Vec<usize> = (1..=limit).collect();
    let mut cv_mae = Vec::with_capacity(limit);
    let mut fit_mae = Vec::with_capacity(limit);

    for &n_components in &candidates {
        let model = PlsRegressor::new(n_components);

        let fitted = model.fit(x, y_scaled)?;
        let calculated = target.inverse_transform(&fitted.predict(x));

        let estimated = target.inverse_transform(&cross_val_predict(&model, x, y_scaled, kfold)?);

        let fit_score = mae(&y_true, &calculated);
        let cv_score = mae(&y_true, &estimated);
        log::debug!(
            "{} components: MAE {:.4}, cross-validated MAE {:.4}",
            n_components,
            fit_score,
            cv_score
        );

        fit_mae.push(fit_score);
        cv_mae.push(cv_score);
    }

    let best = first_argmin(&cv_mae).ok_or(SelectionError::NoFiniteScore)?;

    Ok(ComponentSelection {
        selected: candidates[best],
        candidates,
        cv_mae,
        fit_mae,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ZeroVariancePolicy;
    use crate::preprocessing::StandardScaler;

    #[test]
    fn test_first_argmin_prefers_lowest_index() {
        assert_eq!(first_argmin(&[3.0, 1.0, 1.0, 2.0]), Some(1));
        assert_eq!(first_argmin(&[f64::NAN, 2.0, 2.0]), Some(1));
        assert_eq!(first_argmin(&[f64::NAN]), None);
        assert_eq!(first_argmin(&[]), None);
    }

    fn scaled_problem() -> (Mat<f64>, Col<f64>, TargetScaler) {
        let x_raw = Mat::from_fn(40, 6, |i, j| ((i * (j + 3)) as f64 * 0.29 + j as f64).sin());
        let y_raw = Col::from_fn(40, |i| {
            5.0 + 3.0 * x_raw[(i, 0)] - 2.0 * x_raw[(i, 2)] + 0.2 * ((i * 11) as f64).cos()
        });
        let (_, x) = StandardScaler::fit_transform(&x_raw, ZeroVariancePolicy::Error).unwrap();
        let target = TargetScaler::fit(&y_raw, ZeroVariancePolicy::Error).unwrap();
        let y = target.transform(&y_raw);
        (x, y, target)
    }

    #[test]
    fn test_selection_is_minimum() {
        let (x, y, target) = scaled_problem();
        let limit = component_limit(&x, 5);
        assert_eq!(limit, 5);

        let selection = select_components(&x, &y, &target, limit, &KFold::new(5)).unwrap();

        assert_eq!(selection.candidates, vec![1, 2, 3, 4, 5]);
        assert_eq!(selection.cv_mae.len(), 5);
        assert!((1..=limit).contains(&selection.selected));
        let best = selection.best_cv_mae();
        for (i, &score) in selection.cv_mae.iter().enumerate() {
            assert!(score >= best);
            if i + 1 < selection.selected {
                assert!(score > best);
            }
        }
    }

    #[test]
    fn test_limit_respects_rank() {
        let x = Mat::from_fn(10, 4, |i, j| if j < 2 { i as f64 * (j + 1) as f64 } else { 0.0 });
        assert_eq!(component_limit(&x, 20), 1);
        assert_eq!(component_limit(&x, 0), 0);
    }

    #[test]
    fn test_no_candidates() {
        let (x, y, target) = scaled_problem();
        assert!(matches!(
            select_components(&x, &y, &target, 0, &KFold::new(5)),
            Err(SelectionError::NoCandidates)
        ));
    }
}
