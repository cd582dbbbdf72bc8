use crate::domain::errors::ParkingError;
use crate::domain::parking::{ParkingQuery, ParkingSummary};
use crate::domain::repositories::ParkingRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Street-level parking availability with totals
pub struct ParkingService {
    repository: Arc<dyn ParkingRepository>,
}

impl ParkingService {
    pub fn new(repository: Arc<dyn ParkingRepository>) -> Self {
        Self { repository }
    }

    pub async fn availability(&self, query: &ParkingQuery) -> Result<ParkingSummary, ParkingError> {
        let distribution = self
            .repository
            .street_availability(query)
            .await
            .map_err(|e| {
                error!("Parking lookup failed for {:?}: {:#}", query, e);
                ParkingError::Database(format!("{:#}", e))
            })?;

        debug!("Parking lookup returned {} streets", distribution.len());
        Ok(ParkingSummary::from_distribution(distribution))
    }

    /// Parse the request body and run the lookup
    pub async fn availability_for_payload(
        &self,
        payload: &Value,
    ) -> Result<ParkingSummary, ParkingError> {
        let query = ParkingQuery::from_payload(payload)?;
        self.availability(&query).await
    }
}
