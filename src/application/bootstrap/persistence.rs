use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::DatabaseEnvConfig;
use crate::domain::repositories::ParkingRepository;
use crate::infrastructure::persistence::{Database, PgParkingRepository};

pub struct PersistenceHandle {
    pub parking_repository: Arc<dyn ParkingRepository>,
}

pub struct PersistenceBootstrap;

impl PersistenceBootstrap {
    pub fn init(config: &DatabaseEnvConfig) -> Result<PersistenceHandle> {
        info!("Initializing parking database pool");

        let db = Database::connect_lazy(config).context("Failed to initialize database")?;
        let parking_repository = Arc::new(PgParkingRepository::new(db.pool));

        Ok(PersistenceHandle { parking_repository })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parking::ParkingQuery;

    #[tokio::test]
    async fn test_unreachable_database_fails_per_request() {
        let config = DatabaseEnvConfig {
            url: Some("postgres://parking@127.0.0.1:1/parking".to_string()),
            acquire_timeout_secs: 1,
            ..DatabaseEnvConfig::default()
        };
        let handle = PersistenceBootstrap::init(&config).unwrap();

        let result = handle
            .parking_repository
            .street_availability(&ParkingQuery::Suburb("Carlton".to_string()))
            .await;
        assert!(result.is_err());
    }
}
