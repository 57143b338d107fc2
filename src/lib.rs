//! calhouse — California housing price model
//!
//! Trains three candidate regressors on the California housing dataset,
//! keeps the one with the lowest held-out RMSE, persists it as a JSON
//! artifact, and serves price estimates from that artifact.
//!
//! # Modules
//!
//! - [`data`] - CSV dataset loading
//! - [`features`] - feature/target separation and the log target transform
//! - [`preprocessing`] - median imputation + min-max scaling pipeline
//! - [`training`] - candidate regressors, registry, and the selection loop
//! - [`pipeline`] - the trained pipeline and its serialized artifact
//! - [`inference`] - price estimation over a persisted artifact
//! - [`cli`] - command-line interface

pub mod error;

pub mod data;
pub mod features;
pub mod preprocessing;
pub mod training;

pub mod pipeline;
pub mod inference;

pub mod cli;

pub use error::{CalhouseError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{CalhouseError, Result};

    pub use crate::data::load_dataset;
    pub use crate::features::{select_features, DROPPED_COLUMN, TARGET_COLUMN};
    pub use crate::preprocessing::Preprocessor;
    pub use crate::training::{
        candidate_models, train_and_select, FittedRegressor, RegressionMetrics, RegressorSpec,
        TrainerConfig,
    };

    pub use crate::pipeline::TrainedPipeline;
    pub use crate::inference::{PriceEstimate, PriceEstimator, PropertyInput};
}
