//! CSV ingestion of regional population history and forecast export.
//!
//! Input is long format, one row per region per year:
//!
//! ```text
//! state_code,year,population
//! 2,2001,153210
//! 2,2001,98231
//! 1,2001,120442
//! ```
//!
//! Rows of the selected state are summed per year.

use crate::domain::forecasting::HistoricalSeries;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct PopulationRecord {
    state_code: u32,
    year: i32,
    population: Option<String>,
}

#[derive(Debug, Serialize)]
struct ForecastRow {
    year: i32,
    pred_pop: f64,
}

/// Aggregate one state's population per year from any CSV reader.
pub fn read_state_series<R: Read>(
    reader: R,
    state_code: u32,
    years: RangeInclusive<i32>,
) -> Result<HistoricalSeries> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    let mut skipped = 0usize;

    for result in rdr.deserialize() {
        let record: PopulationRecord = result.context("Malformed population row")?;
        if record.state_code != state_code || !years.contains(&record.year) {
            continue;
        }

        // Blank and non-numeric cells are treated as missing
        match record
            .population
            .as_deref()
            .and_then(|p| p.replace(',', "").parse::<f64>().ok())
        {
            Some(value) if value.is_finite() => {
                *totals.entry(record.year).or_insert(0.0) += value;
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} rows with missing population", skipped);
    }
    debug!(
        "Aggregated {} years for state code {}",
        totals.len(),
        state_code
    );

    HistoricalSeries::from_pairs(totals).context("Aggregated series is invalid")
}

pub fn load_state_series(
    path: &Path,
    state_code: u32,
    years: RangeInclusive<i32>,
) -> Result<HistoricalSeries> {
    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    read_state_series(BufReader::new(file), state_code, years)
}

pub fn write_forecast<W: Write>(writer: W, forecast: &[(i32, f64)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for &(year, pred_pop) in forecast {
        wtr.serialize(ForecastRow { year, pred_pop })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_forecast(path: &Path, forecast: &[(i32, f64)]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).context("Failed to create forecast directory")?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    write_forecast(file, forecast)
}
