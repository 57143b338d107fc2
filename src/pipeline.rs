//! Trained pipeline and its serialized artifact
//!
//! The artifact is the sole interface between the training workflow and any
//! inference consumer: one JSON file holding the fitted preprocessor (with
//! its imputation medians and scaling bounds), the fitted regressor, and the
//! held-out metrics. It is overwritten wholesale by each training run and
//! loaded read-only.

use crate::error::{CalhouseError, Result};
use crate::preprocessing::Preprocessor;
use crate::training::{FittedRegressor, RegressionMetrics};
use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The selected end-to-end pipeline: fitted preprocessing + fitted regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedPipeline {
    /// Registry name of the winning candidate
    pub model_name: String,
    /// Feature columns in training order; inference input must provide them
    pub feature_columns: Vec<String>,
    pub preprocessor: Preprocessor,
    pub model: FittedRegressor,
    /// Held-out scores from the selection run
    pub metrics: RegressionMetrics,
}

impl TrainedPipeline {
    /// Predict log-scale values for the given rows. Callers interpreting the
    /// output as prices must invert with `exp_m1`.
    pub fn predict(&self, df: &DataFrame) -> Result<Array1<f64>> {
        let x = self.preprocessor.transform(df)?;
        self.model.predict(&x)
    }

    /// Persist to `path` as pretty JSON, overwriting any existing artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| CalhouseError::ArtifactWrite {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load a previously saved artifact. A truncated or foreign file fails
    /// to decode rather than loading silently wrong.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CalhouseError::Data(format!("cannot read model artifact {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
