//! Model training module
//!
//! Native implementations of the three candidate regressors (ordinary least
//! squares, random forest, gradient boosting), the regression tree they
//! share, held-out metrics, the fixed candidate registry, and the
//! train/evaluate/select loop.

mod boosting;
mod forest;
mod linear;
mod metrics;
mod registry;
mod selector;
mod tree;

pub use boosting::{GradientBoostingConfig, GradientBoostingRegressor};
pub use forest::RandomForestRegressor;
pub use linear::LinearRegression;
pub use metrics::RegressionMetrics;
pub use registry::{candidate_models, FittedRegressor, RegressorSpec, FOREST_TREES};
pub use selector::{train_and_select, TrainerConfig};
pub use tree::RegressionTree;
