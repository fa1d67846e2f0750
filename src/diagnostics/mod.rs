//! Model validity diagnostics.
//!
//! Error metrics, y-randomization and the MAEcce statistic built from them.

mod maecce;
mod metrics;
mod y_randomization;

pub use maecce::{maecce, NullSummary};
pub use metrics::{mae, r_squared, rmse, ErrorSummary};
pub use y_randomization::YRandomization;
