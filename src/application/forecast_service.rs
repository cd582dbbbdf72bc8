//! Vehicle forecast service.
//!
//! `ForecastContext` is built once at startup from the loaded trend model:
//! the vehicles-per-person ratio is derived immediately, and the context is
//! immutable afterwards so request handlers can share it behind an `Arc`
//! without locking.

use crate::domain::errors::{ForecastError, PipelineError};
use crate::domain::forecasting::{
    ForecastComposer, ForecastRecord, RatioEstimator, RatioWindow, TrendModel, YearRatio,
};
use crate::domain::request::{YearBounds, YearRequest};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    #[serde(rename = "avgVehiclePerPerson")]
    pub avg_vehicle_per_person: f64,
    pub items: Vec<ForecastRecord>,
}

#[derive(Debug, Clone)]
pub struct ForecastContext {
    model: TrendModel,
    ratios: Vec<YearRatio>,
    avg_ratio: f64,
    bounds: YearBounds,
}

impl ForecastContext {
    pub fn new(
        model: TrendModel,
        window: &RatioWindow,
        bounds: YearBounds,
    ) -> Result<Self, PipelineError> {
        let ratios = RatioEstimator::breakdown(window, &model)?;
        let avg_ratio = RatioEstimator::mean(&ratios)?;

        for r in &ratios {
            debug!(
                "Ratio {}: {} vehicles / {:.0} modelled people = {:.4}",
                r.year, r.vehicles, r.modelled_population, r.ratio
            );
        }
        info!(
            "Average vehicles per person over {} window years: {:.4}",
            ratios.len(),
            avg_ratio
        );

        Ok(Self {
            model,
            ratios,
            avg_ratio,
            bounds,
        })
    }

    /// Context over the compiled-in 2016-2020 vehicle window
    pub fn with_reference_window(
        model: TrendModel,
        bounds: YearBounds,
    ) -> Result<Self, PipelineError> {
        Self::new(model, &RatioWindow::reference(), bounds)
    }

    /// Validate the payload, then forecast every requested year.
    ///
    /// Request errors are returned before any model evaluation happens.
    pub fn predict(&self, payload: &Value) -> Result<PredictionResponse, ForecastError> {
        let years = YearRequest::from_payload(payload)?.normalize(&self.bounds)?;
        debug!("Normalized request to {} years", years.len());
        Ok(PredictionResponse {
            avg_vehicle_per_person: self.avg_ratio,
            items: self.forecast_years(&years),
        })
    }

    pub fn forecast_years(&self, years: &BTreeSet<i32>) -> Vec<ForecastRecord> {
        ForecastComposer::forecast(years, &self.model, self.avg_ratio)
    }

    pub fn model(&self) -> &TrendModel {
        &self.model
    }

    pub fn avg_ratio(&self) -> f64 {
        self.avg_ratio
    }

    pub fn ratios(&self) -> &[YearRatio] {
        &self.ratios
    }

    pub fn bounds(&self) -> YearBounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RequestError;
    use serde_json::json;

    fn context() -> ForecastContext {
        let model = TrendModel::from_parameters(2000.0, 100_000.0 - 2000.0 * 2016.0);
        ForecastContext::with_reference_window(model, YearBounds::default()).unwrap()
    }

    #[test]
    fn test_single_year_yields_single_item() {
        let response = context().predict(&json!({"year": 2030})).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].year, 2030);
        assert_eq!(response.items[0].predicted_population, 128_000);
    }

    #[test]
    fn test_vehicles_follow_ratio() {
        let ctx = context();
        let response = ctx.predict(&json!({"years": [2025]})).unwrap();
        let item = response.items[0];
        let expected = (item.predicted_population as f64 * ctx.avg_ratio()).round() as i64;
        assert_eq!(item.predicted_vehicles, expected);
        assert_eq!(response.avg_vehicle_per_person, ctx.avg_ratio());
    }

    #[test]
    fn test_request_errors_surface_as_client_faults() {
        let err = context()
            .predict(&json!({"start": 2101, "end": 2105}))
            .unwrap_err();
        assert!(err.is_client_fault());
        assert!(matches!(
            err,
            ForecastError::Request(RequestError::YearOutOfRange { year: 2101, .. })
        ));
    }

    #[test]
    fn test_degenerate_model_fails_at_construction() {
        let model = TrendModel::from_parameters(0.0, -5.0);
        assert!(matches!(
            ForecastContext::with_reference_window(model, YearBounds::default()),
            Err(PipelineError::Ratio { .. })
        ));
    }

    #[test]
    fn test_average_is_mean_of_window_ratios() {
        let ctx = context();
        let mean = ctx.ratios().iter().map(|r| r.ratio).sum::<f64>() / ctx.ratios().len() as f64;
        assert!((ctx.avg_ratio() - mean).abs() < 1e-12);
        assert_eq!(
            ctx.avg_ratio(),
            RatioEstimator::estimate(&RatioWindow::reference(), ctx.model()).unwrap()
        );
    }

    #[test]
    fn test_response_shape() {
        let response = context().predict(&json!({"year": 2030})).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["avgVehiclePerPerson"].is_f64());
        assert_eq!(json["items"][0]["Year"], 2030);
    }
}
