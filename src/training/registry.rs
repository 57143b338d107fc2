//! Candidate model registry
//!
//! A closed, non-extensible set of three regressors with fixed
//! hyperparameters. No tuning, no plugins: keeping the set closed and the
//! seeds explicit makes every training run reproducible.

use crate::error::Result;
use super::boosting::{GradientBoostingConfig, GradientBoostingRegressor};
use super::forest::RandomForestRegressor;
use super::linear::LinearRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Trees in the random forest candidate
pub const FOREST_TREES: usize = 200;

/// Untrained candidate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegressorSpec {
    /// Ordinary least squares
    OrdinaryLeastSquares,
    /// Bagged trees
    RandomForest { n_estimators: usize },
    /// Boosted shallow trees with default shrinkage
    GradientBoosting,
}

impl RegressorSpec {
    /// Fit this candidate. The seed parameter feeds the stochastic
    /// candidates; OLS ignores it.
    pub fn fit(&self, x: &Array2<f64>, y: &Array1<f64>, seed: u64) -> Result<FittedRegressor> {
        match self {
            RegressorSpec::OrdinaryLeastSquares => {
                let mut model = LinearRegression::new();
                model.fit(x, y)?;
                Ok(FittedRegressor::Linear(model))
            }
            RegressorSpec::RandomForest { n_estimators } => {
                let mut model =
                    RandomForestRegressor::new(*n_estimators).with_random_state(seed);
                model.fit(x, y)?;
                Ok(FittedRegressor::Forest(model))
            }
            RegressorSpec::GradientBoosting => {
                let config = GradientBoostingConfig {
                    random_state: Some(seed),
                    ..Default::default()
                };
                let mut model = GradientBoostingRegressor::new(config);
                model.fit(x, y)?;
                Ok(FittedRegressor::Boosting(model))
            }
        }
    }
}

/// Fitted model variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FittedRegressor {
    Linear(LinearRegression),
    Forest(RandomForestRegressor),
    Boosting(GradientBoostingRegressor),
}

impl FittedRegressor {
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self {
            FittedRegressor::Linear(m) => m.predict(x),
            FittedRegressor::Forest(m) => m.predict(x),
            FittedRegressor::Boosting(m) => m.predict(x),
        }
    }
}

/// The fixed candidate mapping, in registration order. Registration order is
/// the tie-break: on identical RMSE the earlier entry wins.
pub fn candidate_models() -> Vec<(String, RegressorSpec)> {
    vec![
        (
            "LinearRegression".to_string(),
            RegressorSpec::OrdinaryLeastSquares,
        ),
        (
            "RandomForestRegressor".to_string(),
            RegressorSpec::RandomForest {
                n_estimators: FOREST_TREES,
            },
        ),
        (
            "GradientBoostingRegressor".to_string(),
            RegressorSpec::GradientBoosting,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_registry_names_and_order() {
        let candidates = candidate_models();
        let names: Vec<&str> = candidates.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "LinearRegression",
                "RandomForestRegressor",
                "GradientBoostingRegressor"
            ]
        );
    }

    #[test]
    fn test_forest_candidate_has_200_trees() {
        let candidates = candidate_models();
        assert_eq!(
            candidates[1].1,
            RegressorSpec::RandomForest { n_estimators: 200 }
        );
    }

    #[test]
    fn test_spec_fit_dispatch() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];

        let fitted = RegressorSpec::OrdinaryLeastSquares.fit(&x, &y, 42).unwrap();
        assert!(matches!(fitted, FittedRegressor::Linear(_)));

        let predictions = fitted.predict(&x).unwrap();
        assert!((predictions[0] - 2.0).abs() < 1e-6);
    }
}
