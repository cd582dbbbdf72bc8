//! Vehicles-per-person ratio derived from a short historical window.
//!
//! Each window year pairs a recorded vehicle count with the population the
//! trend model predicts for that year, not a measured population. This keeps
//! compatibility with the deployed forecasts; swapping in measured
//! population would shift every vehicle forecast.

use super::trend_model::TrendModel;
use crate::domain::errors::PipelineError;
use statrs::statistics::{Data, Distribution};

/// Recorded vehicle counts used in production, 2016 through 2020.
pub const REFERENCE_VEHICLE_COUNTS: [(i32, f64); 5] = [
    (2016, 209_495.0),
    (2017, 214_408.0),
    (2018, 236_429.0),
    (2019, 215_728.0),
    (2020, 188_855.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleObservation {
    pub year: i32,
    pub vehicles: f64,
}

/// Fixed set of (year, recorded vehicle count) pairs
#[derive(Debug, Clone, PartialEq)]
pub struct RatioWindow {
    entries: Vec<VehicleObservation>,
}

impl RatioWindow {
    pub fn new(entries: Vec<VehicleObservation>) -> Self {
        Self { entries }
    }

    pub fn from_pairs(pairs: &[(i32, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(year, vehicles)| VehicleObservation { year, vehicles })
                .collect(),
        )
    }

    /// The 2016-2020 window compiled into the service
    pub fn reference() -> Self {
        Self::from_pairs(&REFERENCE_VEHICLE_COUNTS)
    }

    pub fn entries(&self) -> &[VehicleObservation] {
        &self.entries
    }

    pub fn years(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.year).collect()
    }
}

/// Ratio for a single window year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearRatio {
    pub year: i32,
    pub modelled_population: f64,
    pub vehicles: f64,
    pub ratio: f64,
}

pub struct RatioEstimator;

impl RatioEstimator {
    /// Per-year vehicles / modelled population for every window entry.
    pub fn breakdown(
        window: &RatioWindow,
        model: &TrendModel,
    ) -> Result<Vec<YearRatio>, PipelineError> {
        if window.entries().is_empty() {
            return Err(PipelineError::Ratio {
                reason: "ratio window is empty".to_string(),
            });
        }

        let populations = model.predict(&window.years());
        window
            .entries()
            .iter()
            .zip(populations)
            .map(|(entry, population)| {
                if population.is_nan() || population <= 0.0 {
                    return Err(PipelineError::Ratio {
                        reason: format!(
                            "modelled population for {} is {}, must be positive",
                            entry.year, population
                        ),
                    });
                }
                Ok(YearRatio {
                    year: entry.year,
                    modelled_population: population,
                    vehicles: entry.vehicles,
                    ratio: entry.vehicles / population,
                })
            })
            .collect()
    }

    /// Arithmetic mean of the per-year ratios
    pub fn estimate(window: &RatioWindow, model: &TrendModel) -> Result<f64, PipelineError> {
        Self::mean(&Self::breakdown(window, model)?)
    }

    /// Mean over an existing breakdown
    pub fn mean(ratios: &[YearRatio]) -> Result<f64, PipelineError> {
        let values: Vec<f64> = ratios.iter().map(|r| r.ratio).collect();
        Data::new(values).mean().ok_or_else(|| PipelineError::Ratio {
            reason: "could not average an empty ratio breakdown".to_string(),
        })
    }
}
