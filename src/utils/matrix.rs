//! Matrix utility functions.

use faer::{Col, Mat};

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let mut means = Col::zeros(n_cols);
    let mut centered = Mat::zeros(n_rows, n_cols);

    for j in 0..n_cols {
        let sum: f64 = (0..n_rows).map(|i| x[(i, j)]).sum();
        means[j] = sum / n_rows as f64;

        for i in 0..n_rows {
            centered[(i, j)] = x[(i, j)] - means[j];
        }
    }

    (centered, means)
}

/// Center a vector by subtracting the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let n = y.nrows();
    let mean: f64 = y.iter().sum::<f64>() / n as f64;

    let centered = Col::from_fn(n, |i| y[i] - mean);

    (centered, mean)
}

/// Arithmetic mean of a vector.
pub fn mean(y: &Col<f64>) -> f64 {
    y.iter().sum::<f64>() / y.nrows() as f64
}

/// Sample standard deviation (denominator n - 1) of a vector.
pub fn sample_std(y: &Col<f64>) -> f64 {
    let n = y.nrows();
    let m = mean(y);
    let ss: f64 = y.iter().map(|&v| (v - m).powi(2)).sum();
    (ss / (n as f64 - 1.0)).sqrt()
}

/// Gather the given rows of a matrix, in order.
pub fn select_rows(x: &Mat<f64>, rows: &[usize]) -> Mat<f64> {
    Mat::from_fn(rows.len(), x.ncols(), |i, j| x[(rows[i], j)])
}

/// Gather the given entries of a vector, in order.
pub fn select_entries(y: &Col<f64>, rows: &[usize]) -> Col<f64> {
    Col::from_fn(rows.len(), |i| y[rows[i]])
}

/// Numerical rank of a matrix from the diagonal of a column-pivoted QR.
///
/// A diagonal entry counts when it exceeds `|r_00| * max(n, p) * eps`.
pub fn matrix_rank(x: &Mat<f64>) -> usize {
    let n = x.nrows();
    let p = x.ncols();
    if n == 0 || p == 0 {
        return 0;
    }

    // Pivoted QR on the tall orientation; rank(X) = rank(X').
    let tall = if n >= p {
        x.clone()
    } else {
        Mat::from_fn(p, n, |i, j| x[(j, i)])
    };
    let k = n.min(p);

    let qr = tall.col_piv_qr();
    let r = qr.R();

    let largest = r[(0, 0)].abs();
    if largest == 0.0 || !largest.is_finite() {
        return 0;
    }
    let tolerance = largest * n.max(p) as f64 * f64::EPSILON;

    let mut rank = 0;
    for i in 0..k {
        if r[(i, i)].abs() > tolerance {
            rank += 1;
        } else {
            break;
        }
    }
    rank
}
