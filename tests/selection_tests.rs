//! Cross-validation and component selection.

mod common;

use approx::assert_relative_eq;
use common::{generate_linear_data, prepared_data};
use maecce::diagnostics::{mae, r_squared};
use maecce::evaluation::evaluate;
use maecce::model_selection::{cross_val_predict, select_components, KFold};
use maecce::solvers::{FittedRegressor, PlsRegressor, Regressor};
use maecce::utils::{mean, select_entries};

#[test]
fn test_folds_partition_samples() {
    for (n, k) in [(50, 5), (23, 5), (7, 7), (31, 4)] {
        let folds = KFold::new(k).split(n).unwrap();
        assert_eq!(folds.len(), k);

        let mut seen = vec![0usize; n];
        for fold in &folds {
            assert_eq!(fold.train.len() + fold.test.len(), n);
            for &i in &fold.test {
                seen[i] += 1;
                assert!(!fold.train.contains(&i));
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }
}

#[test]
fn test_fold_count_exceeding_samples_is_rejected() {
    assert!(KFold::new(6).split(5).is_err());
    assert!(KFold::new(1).split(5).is_err());
}

#[test]
fn test_cross_val_predict_is_out_of_sample() {
    let (x, y, _) = generate_linear_data(40, 4, 1.0, 0.5, 3);
    let model = PlsRegressor::new(2);

    let cv = cross_val_predict(&model, &x, &y, &KFold::new(5)).unwrap();
    let fitted = model.fit(&x, &y).unwrap().predict(&x);

    assert_eq!(cv.nrows(), 40);
    // Held-out predictions cannot beat the in-sample ones.
    assert!(mae(&y, &cv) >= mae(&y, &fitted));
    assert!(r_squared(&y, &cv) > 0.9);
}

#[test]
fn test_selection_picks_first_minimum() {
    let data = prepared_data(50, 100, 12, 8);
    let kfold = KFold::new(5);
    let selection = select_components(
        &data.x_train,
        &data.y_train_scaled,
        &data.target,
        data.component_limit,
        &kfold,
    )
    .unwrap();

    assert_eq!(data.component_limit, 8);
    assert_eq!(selection.candidates, (1..=8).collect::<Vec<_>>());
    assert_eq!(selection.cv_mae.len(), 8);

    let best = selection.best_cv_mae();
    for (i, &score) in selection.cv_mae.iter().enumerate() {
        assert!(score >= best);
        if i + 1 < selection.selected {
            assert!(score > best);
        }
    }
}

#[test]
fn test_selected_model_reproduces_cv_score() {
    let data = prepared_data(50, 100, 10, 6);
    let kfold = KFold::new(5);
    let evaluation = evaluate(&data, &data.y_train_scaled, &kfold).unwrap();

    let model = PlsRegressor::new(evaluation.selection.selected);
    let cv = cross_val_predict(&model, &data.x_train, &data.y_train_scaled, &kfold).unwrap();
    let cv = data.target.inverse_transform(&cv);

    assert_relative_eq!(
        mae(&data.y_train, &cv),
        evaluation.statistics.mae_cv,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        evaluation.selection.best_cv_mae(),
        evaluation.statistics.mae_cv,
        epsilon = 1e-9
    );
}

#[test]
fn test_evaluate_is_idempotent() {
    let data = prepared_data(40, 80, 8, 5);
    let kfold = KFold::new(5);

    let a = evaluate(&data, &data.y_train_scaled, &kfold).unwrap();
    let b = evaluate(&data, &data.y_train_scaled, &kfold).unwrap();

    assert_eq!(a.selection, b.selection);
    assert_eq!(a.statistics, b.statistics);
}

#[test]
fn test_mean_baseline() {
    let data = prepared_data(40, 80, 8, 5);
    let stats = evaluate(&data, &data.y_train_scaled, &KFold::new(5))
        .unwrap()
        .statistics;

    let baseline = faer::Col::from_fn(data.y_train.nrows(), |_| mean(&data.y_train));
    assert_relative_eq!(r_squared(&data.y_train, &baseline), 0.0, epsilon = 1e-12);
    assert_relative_eq!(stats.mae_mean, mae(&data.y_train, &baseline), epsilon = 1e-9);
    assert!(stats.mae < stats.mae_mean);
}

#[test]
fn test_permuted_target_keeps_its_values() {
    let data = prepared_data(30, 40, 6, 4);
    let order: Vec<usize> = (0..30).rev().collect();
    let permuted = select_entries(&data.y_train_scaled, &order);

    let mut a: Vec<f64> = data.y_train_scaled.iter().copied().collect();
    let mut b: Vec<f64> = permuted.iter().copied().collect();
    a.sort_by(|x, y| x.total_cmp(y));
    b.sort_by(|x, y| x.total_cmp(y));
    assert_eq!(a, b);

    let evaluation = evaluate(&data, &permuted, &KFold::new(5)).unwrap();
    assert!(evaluation.statistics.is_finite());
}
