//! Median imputation for missing numeric values

use crate::error::{CalhouseError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fills missing numeric values with the per-column median observed at fit
/// time. The median is robust to the outliers common in demographic columns
/// (sparse population tracts, very large households).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedianImputer {
    fill_values: HashMap<String, f64>,
    is_fitted: bool,
}

impl MedianImputer {
    pub fn new() -> Self {
        Self {
            fill_values: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Compute per-column medians over the non-null values.
    pub fn fit(&mut self, df: &DataFrame, columns: &[String]) -> Result<&mut Self> {
        self.fill_values.clear();

        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| CalhouseError::MissingColumn(col_name.clone()))?;
            let casted = column.cast(&DataType::Float64)?;
            let median = casted.f64()?.median().unwrap_or(0.0);
            self.fill_values.insert(col_name.clone(), median);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Replace nulls using the fitted medians, never recomputing them.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(CalhouseError::NotFitted);
        }

        let mut result = df.clone();
        for (col_name, fill) in &self.fill_values {
            let column = result
                .column(col_name)
                .map_err(|_| CalhouseError::MissingColumn(col_name.clone()))?;
            let casted = column.cast(&DataType::Float64)?;
            let filled: Float64Chunked = casted
                .f64()?
                .into_iter()
                .map(|opt| Some(opt.unwrap_or(*fill)))
                .collect();
            result.with_column(filled.with_name(col_name.as_str().into()).into_series())?;
        }

        Ok(result)
    }

}

impl Default for MedianImputer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_imputation() {
        let df = DataFrame::new(vec![Column::new(
            "total_bedrooms".into(),
            &[Some(100.0), None, Some(300.0), Some(500.0)],
        )])
        .unwrap();

        let mut imputer = MedianImputer::new();
        imputer.fit(&df, &["total_bedrooms".to_string()]).unwrap();
        let result = imputer.transform(&df).unwrap();

        let col = result.column("total_bedrooms").unwrap().f64().unwrap();
        // median of [100, 300, 500] = 300
        assert!((col.get(1).unwrap() - 300.0).abs() < 1e-12);
        assert_eq!(col.null_count(), 0);
    }

    #[test]
    fn test_transform_uses_fitted_median() {
        let fit_df = DataFrame::new(vec![Column::new("a".into(), &[1.0, 2.0, 3.0])]).unwrap();
        let apply_df =
            DataFrame::new(vec![Column::new("a".into(), &[Some(10.0), None])]).unwrap();

        let mut imputer = MedianImputer::new();
        imputer.fit(&fit_df, &["a".to_string()]).unwrap();
        let result = imputer.transform(&apply_df).unwrap();

        // fill value comes from the fitting data, not the transformed frame
        let col = result.column("a").unwrap().f64().unwrap();
        assert!((col.get(1).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unfitted_transform_fails() {
        let df = DataFrame::new(vec![Column::new("a".into(), &[1.0])]).unwrap();
        let imputer = MedianImputer::new();
        assert!(matches!(
            imputer.transform(&df),
            Err(CalhouseError::NotFitted)
        ));
    }
}
