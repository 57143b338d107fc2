//! Data preprocessing module
//!
//! Median imputation and min-max scaling composed into a column-wise
//! pipeline. All feature columns are numeric by the time they reach this
//! module; the categorical column is dropped upstream.

mod imputer;
mod pipeline;
mod scaler;

pub use imputer::MedianImputer;
pub use pipeline::Preprocessor;
pub use scaler::MinMaxScaler;
