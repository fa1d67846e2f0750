//! Core types for the MAEcce study.

mod options;
mod result;
mod statistics;

pub use options::{
    NullMaeSource, OptionsError, StudyOptions, StudyOptionsBuilder, ZeroVariancePolicy,
};
pub use result::RegressionResult;
pub use statistics::{NullColumn, NullRow, NullTable, Statistics};
