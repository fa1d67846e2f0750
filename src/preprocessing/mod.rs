//! Data preprocessing.

mod scaler;

pub use scaler::{ScalerError, StandardScaler, TargetScaler};
