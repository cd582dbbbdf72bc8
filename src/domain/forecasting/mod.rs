//! Population trend and vehicle forecasting pipeline.

pub mod composer;
pub mod ratio;
pub mod series;
pub mod trend_model;
pub mod walk_forward;

pub use composer::{ForecastComposer, ForecastRecord};
pub use ratio::{RatioEstimator, RatioWindow, VehicleObservation, YearRatio};
pub use series::{HistoricalSeries, Observation};
pub use trend_model::TrendModel;
pub use walk_forward::{FoldResult, ValidationReport, ValidationSummary, WalkForwardValidator};
