//! Startup wiring.
//!
//! Everything the request handlers share is constructed here, eagerly,
//! before the listener binds.

pub mod persistence;
pub mod services;

use anyhow::Result;
use std::sync::Arc;

use crate::application::forecast_service::ForecastContext;
use crate::application::parking_service::ParkingService;
use crate::config::Config;
use crate::domain::repositories::ParkingRepository;
use crate::infrastructure::observability::Metrics;
use persistence::PersistenceBootstrap;
use services::ServicesBootstrap;

/// Application-lifetime state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub forecast: Arc<ForecastContext>,
    pub parking: Arc<ParkingService>,
    pub metrics: Option<Metrics>,
}

impl AppState {
    pub fn new(
        forecast: Arc<ForecastContext>,
        parking_repository: Arc<dyn ParkingRepository>,
        metrics: Option<Metrics>,
    ) -> Self {
        if let Some(metrics) = &metrics {
            metrics.avg_vehicle_per_person.set(forecast.avg_ratio());
        }
        Self {
            forecast,
            parking: Arc::new(ParkingService::new(parking_repository)),
            metrics,
        }
    }

    pub fn build(config: &Config) -> Result<Self> {
        let forecast = ServicesBootstrap::init_forecast(&config.model)?;
        let persistence = PersistenceBootstrap::init(&config.database)?;
        let metrics = if config.observability.metrics_enabled {
            Some(Metrics::new()?)
        } else {
            None
        };

        Ok(Self::new(forecast, persistence.parking_repository, metrics))
    }
}
