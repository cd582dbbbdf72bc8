//! Offline trainer for the population trend model.
//!
//! Reads the long-format population CSV, reports walk-forward accuracy,
//! fits the final model on every year and writes the JSON artifact the
//! server loads, plus a CSV of future population for inspection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use motorcast::domain::forecasting::{TrendModel, WalkForwardValidator};
use motorcast::infrastructure::history_csv::{load_state_series, save_forecast};
use motorcast::infrastructure::model_store::{ModelArtifact, save_artifact};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Population history CSV (state_code,year,population)
    #[arg(long, default_value = "data/population.csv")]
    input: PathBuf,

    /// State code whose rows are aggregated
    #[arg(long, default_value_t = 2)]
    state_code: u32,

    /// Region label stored in the artifact and used in default file names
    #[arg(long, default_value = "VIC")]
    region: String,

    /// First training year (inclusive)
    #[arg(long, default_value_t = 2001)]
    year_start: i32,

    /// Last training year (inclusive)
    #[arg(long, default_value_t = 2021)]
    year_end: i32,

    /// Initial training window for walk-forward validation
    #[arg(long, default_value_t = 8)]
    min_train: usize,

    /// Number of future years written to the forecast CSV
    #[arg(long, default_value_t = 30)]
    n_future: i32,

    /// Model artifact path. Default: models/linear_<REGION>.json
    #[arg(long)]
    output: Option<PathBuf>,

    /// Forecast CSV path. Default: models/forecast_<REGION>.csv
    #[arg(long)]
    forecast_output: Option<PathBuf>,

    /// Fit on all years without reporting walk-forward accuracy
    #[arg(long)]
    skip_validation: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();
    if args.year_start > args.year_end {
        bail!(
            "--year-start ({}) must not exceed --year-end ({})",
            args.year_start,
            args.year_end
        );
    }

    let model_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("models/linear_{}.json", args.region)));
    let forecast_path = args
        .forecast_output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("models/forecast_{}.csv", args.region)));

    println!("Loading population history from {:?}", args.input);
    let series = load_state_series(
        &args.input,
        args.state_code,
        args.year_start..=args.year_end,
    )?;
    if series.is_empty() {
        bail!(
            "No population rows for state {} in {}..={}",
            args.state_code,
            args.year_start,
            args.year_end
        );
    }
    println!(
        "[{}] {} yearly totals ({:?}..={:?})",
        args.region,
        series.len(),
        series.first_year(),
        series.last_year()
    );

    let validation = if args.skip_validation {
        None
    } else {
        let report = WalkForwardValidator::new(args.min_train)
            .run(&series)
            .context("Walk-forward validation failed")?;
        println!(
            "[{}] Walk-forward CV RMSE={:.0}  MAPE={:.2}%  ({} folds)",
            args.region,
            report.rmse,
            report.mape,
            report.folds.len()
        );
        Some(report.summary())
    };

    let model = TrendModel::fit(&series).context("Failed to fit final model")?;
    println!(
        "[{}] Final model: slope={:.2}/year intercept={:.2} R^2={:.4}",
        args.region,
        model.slope(),
        model.intercept(),
        model.r_squared()
    );

    let mut artifact = ModelArtifact::new(args.region.clone(), model.clone());
    if let Some(summary) = validation {
        artifact = artifact.with_validation(summary);
    }
    save_artifact(&model_path, &artifact)?;
    println!("[{}] Model saved to {:?}", args.region, model_path);

    // series is non-empty past the check above
    let last_year = series.last_year().unwrap_or(args.year_end);
    let future: Vec<(i32, f64)> = (1..=args.n_future)
        .map(|offset| {
            let year = last_year + offset;
            (year, model.predict_year(year))
        })
        .collect();
    save_forecast(&forecast_path, &future)?;
    println!(
        "[{}] Forecast for {} years saved to {:?}",
        args.region,
        future.len(),
        forecast_path
    );

    Ok(())
}
