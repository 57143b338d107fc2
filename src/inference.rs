//! Inference surface over a persisted model artifact
//!
//! Loads the trained pipeline, builds a one-row feature table from property
//! parameters, predicts, and inverts the log transform into a USD estimate
//! with a ±10% confidence band and an optional currency conversion.

use crate::error::{CalhouseError, Result};
use crate::pipeline::TrainedPipeline;
use crate::training::RegressionMetrics;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half-width of the reported confidence band, as a fraction of the estimate
pub const CONFIDENCE_BAND: f64 = 0.10;

/// USD → INR conversion applied when no live rate is supplied
pub const FALLBACK_USD_TO_INR: f64 = 83.0;

/// One property's parameters, matching the model's eight input features
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PropertyInput {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
}

impl PropertyInput {
    /// Build the one-row feature table. Columns are looked up by name
    /// downstream, so ordering here is cosmetic.
    pub fn to_frame(&self) -> Result<DataFrame> {
        Ok(DataFrame::new(vec![
            Column::new("longitude".into(), [self.longitude]),
            Column::new("latitude".into(), [self.latitude]),
            Column::new("housing_median_age".into(), [self.housing_median_age]),
            Column::new("total_rooms".into(), [self.total_rooms]),
            Column::new("total_bedrooms".into(), [self.total_bedrooms]),
            Column::new("population".into(), [self.population]),
            Column::new("households".into(), [self.households]),
            Column::new("median_income".into(), [self.median_income]),
        ])?)
    }

    /// Feature name/value pairs in canonical column order, for display.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("longitude", self.longitude),
            ("latitude", self.latitude),
            ("housing_median_age", self.housing_median_age),
            ("total_rooms", self.total_rooms),
            ("total_bedrooms", self.total_bedrooms),
            ("population", self.population),
            ("households", self.households),
            ("median_income", self.median_income),
        ]
    }
}

/// A price estimate in USD with its confidence band
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub usd: f64,
    pub lower_usd: f64,
    pub upper_usd: f64,
}

impl PriceEstimate {
    /// Convert the estimate and its band with the given USD rate.
    pub fn in_currency(&self, rate: f64) -> (f64, f64, f64) {
        (self.usd * rate, self.lower_usd * rate, self.upper_usd * rate)
    }

    /// Plain-text estimation report, suitable for saving to a file.
    pub fn report(&self, rate: f64) -> String {
        let (inr, lower_inr, upper_inr) = self.in_currency(rate);
        let mut report = String::new();

        report.push_str("HOUSE PRICE ESTIMATION REPORT\n\n");
        report.push_str("Estimated Price:\n");
        report.push_str(&format!("USD: ${:.0}\n", self.usd));
        report.push_str(&format!("INR: Rs {:.0}\n\n", inr));
        report.push_str(&format!(
            "Confidence Range (+/-{:.0}%):\n",
            CONFIDENCE_BAND * 100.0
        ));
        report.push_str(&format!("USD: ${:.0} - ${:.0}\n", self.lower_usd, self.upper_usd));
        report.push_str(&format!("INR: Rs {:.0} - Rs {:.0}\n\n", lower_inr, upper_inr));
        report.push_str("Exchange Rate:\n");
        report.push_str(&format!("1 USD = Rs {:.2}\n", rate));

        report
    }
}

/// Read-only inference engine over a loaded artifact
#[derive(Debug, Clone)]
pub struct PriceEstimator {
    pipeline: TrainedPipeline,
}

impl PriceEstimator {
    pub fn new(pipeline: TrainedPipeline) -> Self {
        Self { pipeline }
    }

    /// Load the artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(TrainedPipeline::load(path)?))
    }

    /// Name of the model that won selection
    pub fn model_name(&self) -> &str {
        &self.pipeline.model_name
    }

    /// Held-out metrics recorded at training time
    pub fn metrics(&self) -> RegressionMetrics {
        self.pipeline.metrics
    }

    /// Run one prediction and invert the log transform into USD.
    pub fn estimate(&self, input: &PropertyInput) -> Result<PriceEstimate> {
        let df = input.to_frame()?;
        let predictions = self.pipeline.predict(&df)?;

        let log_price = predictions
            .first()
            .copied()
            .ok_or_else(|| CalhouseError::Inference("model returned no prediction".to_string()))?;
        if !log_price.is_finite() {
            return Err(CalhouseError::Inference(format!(
                "non-finite log-scale prediction: {}",
                log_price
            )));
        }

        let usd = log_price.exp_m1();
        Ok(PriceEstimate {
            usd,
            lower_usd: usd * (1.0 - CONFIDENCE_BAND),
            upper_usd: usd * (1.0 + CONFIDENCE_BAND),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_frame_has_all_feature_columns() {
        let input = PropertyInput {
            longitude: -119.0,
            latitude: 36.0,
            housing_median_age: 25.0,
            total_rooms: 2000.0,
            total_bedrooms: 400.0,
            population: 30000.0,
            households: 1200.0,
            median_income: 4.0,
        };

        let df = input.to_frame().unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 8);
        for (name, value) in input.fields() {
            let col = df.column(name).unwrap().f64().unwrap();
            assert_eq!(col.get(0).unwrap(), value);
        }
    }

    #[test]
    fn test_band_is_symmetric_ten_percent() {
        let estimate = PriceEstimate {
            usd: 100_000.0,
            lower_usd: 90_000.0,
            upper_usd: 110_000.0,
        };
        let (inr, lower_inr, upper_inr) = estimate.in_currency(FALLBACK_USD_TO_INR);
        assert!((inr - 8_300_000.0).abs() < 1e-6);
        assert!((lower_inr - 7_470_000.0).abs() < 1e-6);
        assert!((upper_inr - 9_130_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_report_contents() {
        let estimate = PriceEstimate {
            usd: 100_000.0,
            lower_usd: 90_000.0,
            upper_usd: 110_000.0,
        };
        let report = estimate.report(83.0);
        assert!(report.contains("HOUSE PRICE ESTIMATION REPORT"));
        assert!(report.contains("$100000"));
        assert!(report.contains("1 USD = Rs 83.00"));
    }
}
