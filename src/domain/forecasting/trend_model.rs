//! Single-variable linear trend over calendar year.
//!
//! Fits `value = intercept + slope * year` by ordinary least squares. The
//! fitted line can be evaluated at any year; extrapolating past the training
//! range is the normal use.

use super::series::HistoricalSeries;
use crate::domain::errors::PipelineError;
use serde::{Deserialize, Serialize};

/// Fitted linear trend. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    slope: f64,
    intercept: f64,
    n_observations: usize,
    first_year: i32,
    last_year: i32,
    r_squared: f64,
}

impl TrendModel {
    /// Ordinary least squares of value on year.
    ///
    /// Years are centred on their mean before accumulating the sums so that
    /// calendar-year magnitudes (~2000) do not cost precision.
    pub fn fit(series: &HistoricalSeries) -> Result<Self, PipelineError> {
        let points = series.points();
        if points.len() < 2 {
            return Err(PipelineError::Fitting {
                reason: format!(
                    "need at least 2 distinct years to fit a trend, got {}",
                    points.len()
                ),
            });
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.year as f64).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.value).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for p in points {
            let dx = p.year as f64 - mean_x;
            sxx += dx * dx;
            sxy += dx * (p.value - mean_y);
        }

        // Series years are unique, so this only trips on pathological input
        if sxx.abs() < 1e-12 {
            return Err(PipelineError::Fitting {
                reason: "year values have zero variance".to_string(),
            });
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let ss_tot: f64 = points.iter().map(|p| (p.value - mean_y).powi(2)).sum();
        let ss_res: f64 = points
            .iter()
            .map(|p| (p.value - (intercept + slope * p.year as f64)).powi(2))
            .sum();
        let r_squared = if ss_tot > 1e-10 {
            1.0 - ss_res / ss_tot
        } else {
            1.0
        };

        Ok(Self {
            slope,
            intercept,
            n_observations: points.len(),
            first_year: points[0].year,
            last_year: points[points.len() - 1].year,
            r_squared,
        })
    }

    /// Build a model directly from its parameters (used by tests and tooling).
    pub fn from_parameters(slope: f64, intercept: f64) -> Self {
        Self {
            slope,
            intercept,
            n_observations: 0,
            first_year: 0,
            last_year: 0,
            r_squared: 1.0,
        }
    }

    /// Evaluate the fitted line at a single year
    pub fn predict_year(&self, year: i32) -> f64 {
        self.intercept + self.slope * year as f64
    }

    /// Evaluate the fitted line at every year, preserving input order
    pub fn predict(&self, years: &[i32]) -> Vec<f64> {
        years.iter().map(|&y| self.predict_year(y)).collect()
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// Training range as (first, last) year; `None` for hand-built models
    pub fn training_range(&self) -> Option<(i32, i32)> {
        (self.n_observations > 0).then_some((self.first_year, self.last_year))
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }
}
