//! Preprocessing pipeline
//!
//! Ordered numeric stages applied uniformly to every feature column:
//! median imputation, then min-max scaling. The pipeline owns the fitted
//! imputation medians and scaling bounds; they travel with the serialized
//! artifact and are never recomputed on inference input.

use crate::error::{CalhouseError, Result};
use super::imputer::MedianImputer;
use super::scaler::MinMaxScaler;
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column-wise numeric transformation pipeline.
///
/// Built unfit from X's column list; fitting happens only on the training
/// partition so that test rows never leak into the medians or bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    columns: Vec<String>,
    imputer: MedianImputer,
    scaler: MinMaxScaler,
    is_fitted: bool,
}

impl Preprocessor {
    /// Construct an unfit pipeline over the given columns, in order.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            imputer: MedianImputer::new(),
            scaler: MinMaxScaler::new(),
            is_fitted: false,
        }
    }

    /// Construct an unfit pipeline from a feature frame's column list.
    pub fn from_frame(x: &DataFrame) -> Self {
        let columns = x
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        Self::new(columns)
    }

    /// Column set and order this pipeline was built over. Fixed once built;
    /// identical between training and inference by construction.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Fit both stages. The scaler sees imputed values so its bounds match
    /// what transform produces.
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.imputer.fit(df, &self.columns)?;
        let imputed = self.imputer.transform(df)?;
        self.scaler.fit(&imputed, &self.columns)?;
        self.is_fitted = true;
        Ok(self)
    }

    /// Apply the fitted stages and extract the model-facing matrix, columns
    /// in the recorded order.
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(CalhouseError::NotFitted);
        }

        let imputed = self.imputer.transform(df)?;
        let scaled = self.scaler.transform(&imputed)?;
        Self::to_matrix(&scaled, &self.columns)
    }

    /// Extract named columns into a row-major `Array2<f64>`.
    fn to_matrix(df: &DataFrame, columns: &[String]) -> Result<Array2<f64>> {
        let n_rows = df.height();

        let col_data: Vec<Vec<f64>> = columns
            .iter()
            .map(|col_name| {
                let column = df
                    .column(col_name)
                    .map_err(|_| CalhouseError::MissingColumn(col_name.clone()))?;
                let casted = column.cast(&DataType::Float64)?;
                let values: Vec<f64> = casted
                    .f64()?
                    .into_iter()
                    .map(|v| v.unwrap_or(0.0))
                    .collect();
                Ok(values)
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;

        Ok(Array2::from_shape_fn((n_rows, columns.len()), |(r, c)| {
            col_data[c][r]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_df() -> DataFrame {
        df!(
            "median_income" => &[Some(2.0), Some(4.0), None, Some(8.0)],
            "households" => &[100.0, 200.0, 300.0, 400.0]
        )
        .unwrap()
    }

    #[test]
    fn test_columns_match_build_frame() {
        let df = feature_df();
        let preprocessor = Preprocessor::from_frame(&df);
        assert_eq!(preprocessor.columns(), &["median_income", "households"]);
    }

    #[test]
    fn test_fit_transform_shape_and_bounds() {
        let df = feature_df();
        let mut preprocessor = Preprocessor::from_frame(&df);
        assert!(!preprocessor.is_fitted());
        preprocessor.fit(&df).unwrap();
        assert!(preprocessor.is_fitted());

        let x = preprocessor.transform(&df).unwrap();
        assert_eq!(x.shape(), &[4, 2]);
        for &v in x.iter() {
            assert!((0.0..=1.0).contains(&v), "value out of range: {}", v);
        }
    }

    #[test]
    fn test_null_imputed_before_scaling() {
        let df = feature_df();
        let mut preprocessor = Preprocessor::from_frame(&df);
        preprocessor.fit(&df).unwrap();

        let x = preprocessor.transform(&df).unwrap();
        // median of [2, 4, 8] = 4 → scaled with min 2, range 6
        assert!((x[[2, 0]] - (4.0 - 2.0) / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_unfitted_transform_fails() {
        let df = feature_df();
        let preprocessor = Preprocessor::from_frame(&df);
        assert!(matches!(
            preprocessor.transform(&df),
            Err(CalhouseError::NotFitted)
        ));
    }

    #[test]
    fn test_fitted_statistics_apply_to_new_rows() {
        let df = feature_df();
        let mut preprocessor = Preprocessor::from_frame(&df);
        preprocessor.fit(&df).unwrap();

        let fresh = df!(
            "median_income" => &[5.0],
            "households" => &[250.0]
        )
        .unwrap();

        let x = preprocessor.transform(&fresh).unwrap();
        assert!((x[[0, 0]] - (5.0 - 2.0) / 6.0).abs() < 1e-12);
        assert!((x[[0, 1]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_column_at_transform() {
        let df = feature_df();
        let mut preprocessor = Preprocessor::from_frame(&df);
        preprocessor.fit(&df).unwrap();

        let partial = df!("median_income" => &[5.0]).unwrap();
        assert!(matches!(
            preprocessor.transform(&partial),
            Err(CalhouseError::MissingColumn(_))
        ));
    }
}
