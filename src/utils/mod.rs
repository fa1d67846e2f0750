//! Shared numerical helpers.

mod matrix;

pub use matrix::{
    center_columns, center_vector, matrix_rank, mean, sample_std, select_entries, select_rows,
};
