//! Min-max feature scaling

use crate::error::{CalhouseError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters for one fitted column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScaleParams {
    min: f64,
    range: f64,
}

/// Rescales each column to [0, 1] using the min/max observed at fit time:
/// `(x - min) / (max - min)`. A constant column maps to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    params: HashMap<String, ScaleParams>,
    is_fitted: bool,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Record per-column min and range.
    pub fn fit(&mut self, df: &DataFrame, columns: &[String]) -> Result<&mut Self> {
        self.params.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| CalhouseError::MissingColumn(col_name.clone()))?;
            let casted = column.cast(&DataType::Float64)?;
            let ca = casted.f64()?;

            let min = ca.min().unwrap_or(0.0);
            let max = ca.max().unwrap_or(1.0);
            let range = max - min;
            self.params.insert(
                col_name.clone(),
                ScaleParams {
                    min,
                    range: if range == 0.0 { 1.0 } else { range },
                },
            );
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Apply the fitted bounds. Values outside the fitted range land outside
    /// [0, 1]; that is intentional at inference time.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(CalhouseError::NotFitted);
        }

        let mut result = df.clone();
        for (col_name, params) in &self.params {
            let column = result
                .column(col_name)
                .map_err(|_| CalhouseError::MissingColumn(col_name.clone()))?;
            let casted = column.cast(&DataType::Float64)?;
            let scaled: Float64Chunked = casted
                .f64()?
                .into_iter()
                .map(|opt| opt.map(|v| (v - params.min) / params.range))
                .collect();
            result.with_column(scaled.with_name(col_name.as_str().into()).into_series())?;
        }

        Ok(result)
    }
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_bounds() {
        let df =
            DataFrame::new(vec![Column::new("a".into(), &[1.0, 2.0, 3.0, 4.0, 5.0])]).unwrap();

        let mut scaler = MinMaxScaler::new();
        scaler.fit(&df, &["a".to_string()]).unwrap();
        let result = scaler.transform(&df).unwrap();

        let col = result.column("a").unwrap().f64().unwrap();
        assert!((col.min().unwrap() - 0.0).abs() < 1e-12);
        assert!((col.max().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let df = DataFrame::new(vec![Column::new("a".into(), &[7.0, 7.0, 7.0])]).unwrap();

        let mut scaler = MinMaxScaler::new();
        scaler.fit(&df, &["a".to_string()]).unwrap();
        let result = scaler.transform(&df).unwrap();

        let col = result.column("a").unwrap().f64().unwrap();
        for v in col.into_iter().flatten() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_transform_uses_fitted_bounds() {
        let fit_df = DataFrame::new(vec![Column::new("a".into(), &[0.0, 10.0])]).unwrap();
        let apply_df = DataFrame::new(vec![Column::new("a".into(), &[20.0])]).unwrap();

        let mut scaler = MinMaxScaler::new();
        scaler.fit(&fit_df, &["a".to_string()]).unwrap();
        let result = scaler.transform(&apply_df).unwrap();

        let col = result.column("a").unwrap().f64().unwrap();
        // out-of-range input scales past 1.0 with the stored bounds
        assert!((col.get(0).unwrap() - 2.0).abs() < 1e-12);
    }
}
