use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::application::forecast_service::ForecastContext;
use crate::config::ModelEnvConfig;
use crate::domain::forecasting::RatioWindow;
use crate::infrastructure::model_store::ModelStore;

pub struct ServicesBootstrap;

impl ServicesBootstrap {
    /// Load the model artifact and derive the ratio, once.
    ///
    /// Any failure here is fatal: a missing artifact or a degenerate model
    /// must stop startup rather than surface on the first request.
    pub fn init_forecast(config: &ModelEnvConfig) -> Result<Arc<ForecastContext>> {
        Self::init_forecast_from(&config.model_store(), config)
    }

    pub fn init_forecast_from(
        store: &ModelStore,
        config: &ModelEnvConfig,
    ) -> Result<Arc<ForecastContext>> {
        let (path, artifact) = store.load().context("Failed to load population model")?;
        info!(
            "Loaded {} population model from {:?} (trained {}, slope {:.1}/year)",
            artifact.region,
            path,
            artifact.trained_at,
            artifact.model.slope()
        );
        if let Some(validation) = &artifact.validation {
            info!(
                "Model walk-forward CV: RMSE={:.0} MAPE={:.2}% over {} folds",
                validation.rmse, validation.mape, validation.folds
            );
        }

        let context = ForecastContext::new(
            artifact.model,
            &RatioWindow::reference(),
            config.year_bounds(),
        )
        .context("Failed to derive vehicles-per-person ratio")?;

        Ok(Arc::new(context))
    }
}
