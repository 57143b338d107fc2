//! Feature and target preparation
//!
//! Splits the raw dataset into the feature matrix X (every column except the
//! unused categorical column and the target) and the log-compressed target
//! vector y. Predictions made against y must be inverted with `exp_m1` before
//! being read as prices.

use crate::error::{CalhouseError, Result};
use ndarray::Array1;
use polars::prelude::*;

/// Prediction target: the district's median house value in USD.
pub const TARGET_COLUMN: &str = "median_house_value";

/// Categorical column dropped unused before training.
pub const DROPPED_COLUMN: &str = "ocean_proximity";

/// Separate features from the target.
///
/// Returns `(X, y)` where X keeps the source column order minus
/// [`DROPPED_COLUMN`] and [`TARGET_COLUMN`], and y is `ln_1p` of the target.
/// Fails with [`CalhouseError::MissingColumn`] if either named column is
/// absent. No further validation is done; missing numeric feature values are
/// tolerated and imputed downstream.
pub fn select_features(df: &DataFrame) -> Result<(DataFrame, Array1<f64>)> {
    for required in [DROPPED_COLUMN, TARGET_COLUMN] {
        if df.column(required).is_err() {
            return Err(CalhouseError::MissingColumn(required.to_string()));
        }
    }

    let target = df.column(TARGET_COLUMN)?.cast(&DataType::Float64)?;
    let y: Array1<f64> = target
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0).ln_1p())
        .collect();

    let x = df.drop(DROPPED_COLUMN)?.drop(TARGET_COLUMN)?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn housing_df() -> DataFrame {
        df!(
            "longitude" => &[-122.2, -118.4, -121.9],
            "median_income" => &[8.3, 3.1, 5.6],
            "ocean_proximity" => &["NEAR BAY", "INLAND", "NEAR BAY"],
            "median_house_value" => &[452600.0, 126500.0, 261000.0]
        )
        .unwrap()
    }

    #[test]
    fn test_select_features_drops_both_columns() {
        let df = housing_df();
        let (x, y) = select_features(&df).unwrap();

        let names: Vec<&str> = x.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["longitude", "median_income"]);
        assert_eq!(y.len(), 3);
        assert!((y[0] - 452600.0f64.ln_1p()).abs() < 1e-12);
    }

    #[test]
    fn test_missing_target_column() {
        let df = housing_df().drop(TARGET_COLUMN).unwrap();
        let err = select_features(&df).unwrap_err();
        assert!(matches!(err, CalhouseError::MissingColumn(ref c) if c == TARGET_COLUMN));
    }

    #[test]
    fn test_missing_categorical_column() {
        let df = housing_df().drop(DROPPED_COLUMN).unwrap();
        let err = select_features(&df).unwrap_err();
        assert!(matches!(err, CalhouseError::MissingColumn(ref c) if c == DROPPED_COLUMN));
    }

    #[test]
    fn test_log_transform_round_trips() {
        for price in [0.0f64, 1.0, 55_000.0, 452_600.0, 5_000_001.0] {
            let restored = price.ln_1p().exp_m1();
            assert!(
                (restored - price).abs() < 1e-6 * price.max(1.0),
                "round trip drifted for {}: {}",
                price,
                restored
            );
        }
    }
}
