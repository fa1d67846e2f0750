//! Regression solvers.

mod pls;
mod traits;

pub use pls::{FittedPls, PlsRegressor};
pub use traits::{FittedRegressor, RegressionError, Regressor};
