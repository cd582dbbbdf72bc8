//! Walk-forward (expanding window) validation of the trend model.
//!
//! For every index `i >= min_train` a fresh model is fitted on points
//! `[0, i)` and scored on point `i`. Each point after the initial window is
//! tested exactly once and never sees its own future.
//!
//! MAPE divides by the actual value, so a zero actual makes it infinite.
//! Population series never contain zeros; the metric is reported as-is.

use super::series::HistoricalSeries;
use super::trend_model::TrendModel;
use crate::domain::errors::PipelineError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution};

/// One-step-ahead prediction for a single held-out year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldResult {
    pub year: i32,
    pub actual: f64,
    pub predicted: f64,
}

impl FoldResult {
    pub fn error(&self) -> f64 {
        self.actual - self.predicted
    }
}

/// Accuracy summary persisted next to the trained model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub min_train: usize,
    pub folds: usize,
    pub rmse: f64,
    pub mape: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub min_train: usize,
    pub folds: Vec<FoldResult>,
    pub rmse: f64,
    pub mape: f64,
}

impl ValidationReport {
    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            min_train: self.min_train,
            folds: self.folds.len(),
            rmse: self.rmse,
            mape: self.mape,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WalkForwardValidator {
    min_train: usize,
}

impl Default for WalkForwardValidator {
    fn default() -> Self {
        Self::new(8)
    }
}

impl WalkForwardValidator {
    pub fn new(min_train: usize) -> Self {
        Self { min_train }
    }

    pub fn min_train(&self) -> usize {
        self.min_train
    }

    /// Returns (rmse, mape)
    pub fn evaluate(&self, series: &HistoricalSeries) -> Result<(f64, f64), PipelineError> {
        let report = self.run(series)?;
        Ok((report.rmse, report.mape))
    }

    /// Full walk-forward run including every fold's prediction.
    ///
    /// Folds are independent so they are fitted in parallel; results come
    /// back in year order.
    pub fn run(&self, series: &HistoricalSeries) -> Result<ValidationReport, PipelineError> {
        let n = series.len();
        if self.min_train >= n {
            return Err(PipelineError::Validation {
                reason: format!(
                    "min_train ({}) must be smaller than the series length ({}); no folds to evaluate",
                    self.min_train, n
                ),
            });
        }

        let points = series.points();
        let folds: Vec<FoldResult> = (self.min_train..n)
            .into_par_iter()
            .map(|i| -> Result<FoldResult, PipelineError> {
                let model = TrendModel::fit(&series.head(i))?;
                let target = points[i];
                Ok(FoldResult {
                    year: target.year,
                    actual: target.value,
                    predicted: model.predict_year(target.year),
                })
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        let squared: Vec<f64> = folds.iter().map(|f| f.error().powi(2)).collect();
        let rmse = Data::new(squared).mean().unwrap_or(f64::NAN).sqrt();

        let pct: Vec<f64> = folds
            .iter()
            .map(|f| (f.error() / f.actual).abs())
            .collect();
        let mape = Data::new(pct).mean().unwrap_or(f64::NAN) * 100.0;

        Ok(ValidationReport {
            min_train: self.min_train,
            folds,
            rmse,
            mape,
        })
    }
}
