use super::trend_model::TrendModel;
use serde::Serialize;
use std::collections::BTreeSet;

/// One forecast row. Field names follow the public response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "PredictedPopulation")]
    pub predicted_population: i64,
    #[serde(rename = "PredictedVehicles")]
    pub predicted_vehicles: i64,
}

pub struct ForecastComposer;

impl ForecastComposer {
    /// Population from the trend, vehicles from population times the ratio.
    ///
    /// Both figures are rounded to whole units; vehicles are derived from the
    /// rounded population. `BTreeSet` iteration keeps the output ascending.
    pub fn forecast(
        years: &BTreeSet<i32>,
        model: &TrendModel,
        avg_ratio: f64,
    ) -> Vec<ForecastRecord> {
        years
            .iter()
            .map(|&year| {
                let population = model.predict_year(year).round();
                let vehicles = (population * avg_ratio).round();
                ForecastRecord {
                    year,
                    predicted_population: population as i64,
                    predicted_vehicles: vehicles as i64,
                }
            })
            .collect()
    }
}
